pub mod task;
pub mod user;

pub use task::{NewTask, Task, TaskChanges, TaskPatch};
pub use user::{User, UserProfile};
