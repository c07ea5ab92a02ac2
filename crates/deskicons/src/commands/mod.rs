pub mod desktop;
pub mod init;
pub mod load;
pub mod move_icon;
pub mod save;

#[cfg(windows)]
pub mod count;
#[cfg(windows)]
pub mod list;
