mod components;
mod config;
mod error;
mod layers;
mod leaflet;
mod model;
mod overpass;
mod state;
mod util;

use components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
