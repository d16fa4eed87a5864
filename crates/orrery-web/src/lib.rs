pub mod canvas;
pub mod config;
pub mod dom;
pub mod error;
pub mod host;
pub mod runner;

pub use canvas::CanvasPainter;
pub use config::{ControlBinding, HostConfig};
pub use error::HostError;
pub use runner::GameRunner;

/// Generate the wasm start function for a game.
///
/// The generated `start` installs the panic hook and console logger, then
/// hands a fresh game to [`host::run`], which owns the runner from there on.
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::MyGame;
///
/// orrery_web::export_game!(MyGame, "my-game", orrery_web::HostConfig::default());
/// ```
///
/// # Arguments
///
/// - `$game_type`: a type implementing `orrery_engine::Game` with a `new()` constructor
/// - `$game_name`: a string literal used in the startup log line
/// - `$host`: an expression producing the `HostConfig` (element ids, control bindings)
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal, $host:expr) => {
        #[wasm_bindgen(start)]
        pub fn start() -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            $crate::host::run(<$game_type>::new(), $host)?;
            log::info!("{}: initialized", $game_name);
            Ok(())
        }
    };

    ($game_type:ty, $game_name:literal) => {
        $crate::export_game!($game_type, $game_name, $crate::HostConfig::default());
    };
}
