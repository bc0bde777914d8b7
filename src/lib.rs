pub mod actions;
pub mod constants;
pub mod coords;
pub mod input;
pub mod keybindings;
pub mod persistence;
pub mod store;
pub mod theme;
pub mod tracing_sub;
pub mod window;
pub mod workspace;
pub mod zoom;

pub use coords::{CanvasRect, ModelRect};
pub use input::{GestureEvent, GestureKind, InputReconciler, Intent};
pub use persistence::{FileStorage, KeyValueStore, MemoryStorage, PersistError, WorkspaceStorage};
pub use store::Store;
pub use theme::Theme;
pub use window::{Window, WindowId, WindowOptions, WindowPatch};
pub use workspace::Workspace;
