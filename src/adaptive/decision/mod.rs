pub mod calibration;
pub mod steady;

pub use calibration::CalibrationPolicy;
pub use steady::SteadyPolicy;
