/// Category20 palette, cycled by charge-state index.
pub const COLOR_PALETTE: [[u8; 4]; 20] = [
    [0x1f, 0x77, 0xb4, 255], // Blue
    [0xae, 0xc7, 0xe8, 255], // Light blue
    [0xff, 0x7f, 0x0e, 255], // Orange
    [0xff, 0xbb, 0x78, 255], // Light orange
    [0x2c, 0xa0, 0x2c, 255], // Green
    [0x98, 0xdf, 0x8a, 255], // Light green
    [0xd6, 0x27, 0x28, 255], // Red
    [0xff, 0x98, 0x96, 255], // Light red
    [0x94, 0x67, 0xbd, 255], // Purple
    [0xc5, 0xb0, 0xd5, 255], // Light purple
    [0x8c, 0x56, 0x4b, 255], // Brown
    [0xc4, 0x9c, 0x94, 255], // Light brown
    [0xe3, 0x77, 0xc2, 255], // Pink
    [0xf7, 0xb6, 0xd2, 255], // Light pink
    [0x7f, 0x7f, 0x7f, 255], // Gray
    [0xc7, 0xc7, 0xc7, 255], // Light gray
    [0xbc, 0xbd, 0x22, 255], // Olive
    [0xdb, 0xdb, 0x8d, 255], // Light olive
    [0x17, 0xbe, 0xcf, 255], // Cyan
    [0x9e, 0xda, 0xe5, 255], // Light cyan
];

pub fn color_for_index(index: usize) -> [u8; 4] {
    COLOR_PALETTE[index % COLOR_PALETTE.len()]
}

pub fn color32_for_index(index: usize) -> egui::Color32 {
    let [r, g, b, a] = color_for_index(index);
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// One drawn line on the chart. `x` is already in log10(time).
#[derive(Debug, Clone)]
pub struct DataSeries {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: [u8; 4],
    pub visible: bool,
    /// Line width for this series (pixels).
    pub line_width: f32,
}

impl DataSeries {
    pub fn new(index: usize, label: String, x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            label,
            x,
            y,
            color: color_for_index(index),
            visible: true,
            line_width: 2.0,
        }
    }

    pub fn color32(&self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.color[0], self.color[1], self.color[2], self.color[3])
    }

    pub fn points(&self) -> Vec<[f64; 2]> {
        self.x.iter().zip(self.y.iter()).map(|(&x, &y)| [x, y]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycles_every_twenty() {
        assert_eq!(color_for_index(0), color_for_index(20));
        assert_eq!(color_for_index(7), color_for_index(47));
        assert_ne!(color_for_index(0), color_for_index(1));
    }

    #[test]
    fn test_new_series_is_visible_with_palette_color() {
        let s = DataSeries::new(3, "3+".to_string(), vec![0.0, 1.0], vec![0.2, 0.4]);
        assert!(s.visible);
        assert_eq!(s.color, COLOR_PALETTE[3]);
        assert_eq!(s.points(), vec![[0.0, 0.2], [1.0, 0.4]]);
    }
}
