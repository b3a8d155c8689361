// Jitter pulse - short random wiggle so hosts register a drag

use crate::config::PointerConfig;
use crate::errors::GridResult;
use crate::geometry::Point;
use crate::host::PointerBackend;
use rand::Rng;

/// Move a fixed number of times within `shake_pixel_range` of `origin`,
/// pausing one frame after each move, then return to `origin`.
pub fn jitter<R: Rng>(
    backend: &mut dyn PointerBackend,
    rng: &mut R,
    origin: Point,
    config: &PointerConfig,
) -> GridResult<()> {
    let range = i32::from(config.shake_pixel_range);
    let frame = config.shake_frame();

    for _ in 0..config.shake_moves() {
        let dx = rng.gen_range(-range..=range) as f64;
        let dy = rng.gen_range(-range..=range) as f64;
        backend.move_pointer(origin.x + dx, origin.y + dy)?;
        if config.shake_duration_ms > 0 {
            std::thread::sleep(frame);
        }
    }
    backend.move_pointer(origin.x, origin.y)
}
