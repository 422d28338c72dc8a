mod central_panel;
mod dialogs;
mod status_panel;
mod tools_panel;

pub use central_panel::central_panel;
pub use dialogs::{Dialog, dialogs};
pub use status_panel::status_panel;
pub use tools_panel::tools_panel;
