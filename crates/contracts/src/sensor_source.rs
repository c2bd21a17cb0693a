//! MotionSource trait - gyroscope feed abstraction
//!
//! Mirrors a device listener: the platform pushes events through a registered
//! callback until `stop` is called.

use std::sync::Arc;

use crate::MotionEvent;

/// Motion event callback type
pub type MotionEventCallback = Arc<dyn Fn(MotionEvent) + Send + Sync>;

/// Gyroscope data source
///
/// Device-backed and mock feeds implement this trait so the recorder treats
/// them the same way.
///
/// # Example
///
/// ```ignore
/// let source: Arc<dyn MotionSource> = platform.gyroscope();
/// if source.is_available() {
///     source.listen(Arc::new(|event| println!("{:?}", event.angular_velocity)));
/// }
/// source.stop();
/// ```
pub trait MotionSource: Send + Sync {
    /// Source identifier, used in logs
    fn source_id(&self) -> &str;

    /// Whether the sensor exists and access is permitted
    fn is_available(&self) -> bool;

    /// Register the event callback
    ///
    /// Repeated calls while listening are ignored.
    fn listen(&self, callback: MotionEventCallback);

    /// Stop producing events
    fn stop(&self);

    /// Check if currently listening
    fn is_listening(&self) -> bool;
}
