#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod components;
pub mod config;
pub mod error;
pub mod file_handler;
pub mod font;
pub mod input;
pub mod panels;
pub mod raster;
pub mod state;
pub mod surface;
pub mod tools;

pub use app::PaintApp;
pub use canvas::{CanvasOp, DisplayCanvas};
pub use config::PaintConfig;
pub use error::{PaintError, PaintResult};
pub use file_handler::FileHandler;
pub use font::FontChoice;
pub use input::{InputHandler, PointerEvent};
pub use raster::RasterBuffer;
pub use state::{DrawingState, GestureState, Palette};
pub use surface::{Mirror, Surface};
pub use tools::{TextPrompt, Tool, ToolController};
