pub mod debug_controls;
