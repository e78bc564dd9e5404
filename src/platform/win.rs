mod counter;
mod desktop;
mod input;
mod layout;

pub use counter::PerformanceCounter;
pub use desktop::WindowsDesktop;
pub use layout::SystemLayout;
