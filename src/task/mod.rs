pub mod autonomous_drive;
pub mod button;
pub mod display;
pub mod distance_measure;
pub mod interval_timer;
pub mod motor_driver;
pub mod resources;
