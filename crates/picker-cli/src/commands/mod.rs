pub mod at;
pub mod dispatch;
pub mod elements;
pub mod outline;
pub mod select;
pub mod skeleton;
