//! Contiguous per-instance transform and color storage.

use glam::Mat4;

/// One transform matrix and one color per instance, indexed by
/// instance id.
///
/// A pool has a fixed capacity; changing the instance count means
/// allocating a new pool (venue switch, quality-driven crowd resize).
/// Writes accumulate silently until `commit()` bumps the committed
/// generation, which is the single signal the renderer watches for
/// re-upload. Callers commit exactly once per frame, after all writes —
/// a partial upload mid-update would hand the GPU a half-written frame.
#[derive(Debug)]
pub struct InstancePool {
    transforms: Vec<Mat4>,
    colors: Vec<[f32; 3]>,
    generation: u64,
}

impl InstancePool {
    /// Allocate a pool for `capacity` instances, all identity/white.
    pub fn allocate(capacity: usize) -> Self {
        log::debug!("[instance::pool] allocating pool for {} instances", capacity);
        Self {
            transforms: vec![Mat4::IDENTITY; capacity],
            colors: vec![[1.0, 1.0, 1.0]; capacity],
            generation: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.transforms.len()
    }

    /// Write one instance transform. An out-of-range index is a
    /// programming error, not a recoverable condition.
    pub fn set_transform(&mut self, index: usize, transform: Mat4) {
        assert!(
            index < self.transforms.len(),
            "instance index {} out of range (capacity {})",
            index,
            self.transforms.len()
        );
        self.transforms[index] = transform;
    }

    /// Write one instance color. Same precondition as `set_transform`.
    pub fn set_color(&mut self, index: usize, color: [f32; 3]) {
        assert!(
            index < self.colors.len(),
            "instance index {} out of range (capacity {})",
            index,
            self.colors.len()
        );
        self.colors[index] = color;
    }

    /// Bulk mutable access for the hot per-frame update loop. The
    /// commit discipline is unchanged: nothing reaches the GPU until
    /// `commit()`.
    pub fn transforms_mut(&mut self) -> &mut [Mat4] {
        &mut self.transforms
    }

    pub fn colors_mut(&mut self) -> &mut [[f32; 3]] {
        &mut self.colors
    }

    /// Both tables at once, for loops that write transform and color
    /// per instance.
    pub fn slices_mut(&mut self) -> (&mut [Mat4], &mut [[f32; 3]]) {
        (&mut self.transforms, &mut self.colors)
    }

    pub fn transforms(&self) -> &[Mat4] {
        &self.transforms
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    /// Mark this frame's writes complete. The renderer uploads a pool
    /// whose committed generation is newer than its uploaded one.
    pub fn commit(&mut self) {
        self.generation += 1;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn allocate_initializes_identity() {
        let pool = InstancePool::allocate(4);
        assert_eq!(pool.capacity(), 4);
        assert_eq!(pool.transforms()[3], Mat4::IDENTITY);
        assert_eq!(pool.generation(), 0);
    }

    #[test]
    fn commit_bumps_generation_once_per_call() {
        let mut pool = InstancePool::allocate(2);
        pool.set_transform(0, Mat4::from_translation(Vec3::X));
        pool.set_color(1, [0.5, 0.0, 0.0]);
        assert_eq!(pool.generation(), 0);
        pool.commit();
        assert_eq!(pool.generation(), 1);
        pool.commit();
        assert_eq!(pool.generation(), 2);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_write_panics() {
        let mut pool = InstancePool::allocate(2);
        pool.set_transform(2, Mat4::IDENTITY);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_color_panics() {
        let mut pool = InstancePool::allocate(1);
        pool.set_color(5, [1.0, 0.0, 0.0]);
    }
}
