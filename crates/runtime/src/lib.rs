pub mod events;
pub mod journal;
pub mod logging;
pub mod stop;
pub mod ticker;

pub fn module_ready() -> bool {
    true
}
