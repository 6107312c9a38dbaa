pub mod list;
pub mod task;
pub mod user;

pub use list::{List, ListInput, ListWithCount, ListWithTasks};
pub use task::{DueFilter, StatusUpdate, Task, TaskInput, TaskPriority, TaskQuery, TaskStatus};
pub use user::{UpdateUserInput, User, UserView};
