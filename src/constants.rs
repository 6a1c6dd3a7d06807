//! Well known table keys and unit conversions

/// Reference table, from which the receiver clock model is fitted:
/// rover single point positioning solutions, indexed by GPS time.
pub const REFERENCE_TABLE: &str = "rover_spp";

/// Local (host) log clock offset field, expressed in milliseconds.
pub const HOST_OFFSET: &str = "host_offset";

/// Default interpolated GPS time column
pub const APPROX_GPS_TIME: &str = "approx_gps_time";

pub(crate) const MSEC_TO_SEC: f64 = 1.0E-3;
