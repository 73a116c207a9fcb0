//! Triangle-strip view of the terrain grid.

use glam::Vec3;

use super::TerrainField;

impl TerrainField {
    /// Strip joining `row` and `row + 1`, lifted by `lift`
    ///
    /// Vertices alternate between the two rows, column by column, in grid
    /// space (x = column * scale, y = row * scale, z = height).
    pub fn row_strip(&self, row: usize, lift: f32, out: &mut Vec<Vec3>) {
        out.clear();
        if row + 1 >= self.rows() {
            return;
        }

        let scale = self.scale();
        let y0 = row as f32 * scale;
        let y1 = (row + 1) as f32 * scale;
        for col in 0..self.cols() {
            let x = col as f32 * scale;
            out.push(Vec3::new(x, y0, self.height(col, row) + lift));
            out.push(Vec3::new(x, y1, self.height(col, row + 1) + lift));
        }
    }

    /// Number of strips drawn per layer
    pub fn strip_count(&self) -> usize {
        self.rows() - 1
    }
}
