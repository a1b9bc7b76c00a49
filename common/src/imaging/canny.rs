use image::GrayImage;

/// 二値エッジマップ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMap {
    width: u32,
    height: u32,
    data: Vec<bool>,
}

impl EdgeMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![false; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        self.data[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        self.data[(y * self.width + x) as usize] = value;
    }

    /// エッジ画素の総数
    pub fn edge_count(&self) -> usize {
        self.data.iter().filter(|&&e| e).count()
    }

    /// 矩形 [x0, x1) × [y0, y1) 内のエッジ画素数
    pub fn count_in(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> usize {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        (y0..y1)
            .map(|y| (x0..x1).filter(|&x| self.get(x, y)).count())
            .sum()
    }

    pub(crate) fn as_slice(&self) -> &[bool] {
        &self.data
    }
}

// tan(22.5°), tan(67.5°) を1000倍した整数
const TAN_22_5: i64 = 414;
const TAN_67_5: i64 = 2414;

/// Cannyエッジ検出
///
/// 3×3 Sobel（複製境界）、L1勾配強度、4方向の非極大抑制、
/// 8連結のヒステリシス閾値処理。`low` を超える画素が候補、`high` を超える画素が確定エッジ。
pub fn canny(gray: &GrayImage, low: f32, high: f32) -> EdgeMap {
    let (w, h) = gray.dimensions();
    let mut edges = EdgeMap::new(w, h);
    if w == 0 || h == 0 {
        return edges;
    }
    let (wi, hi) = (w as i64, h as i64);
    let at = |x: i64, y: i64| -> i64 {
        gray.get_pixel(x.clamp(0, wi - 1) as u32, y.clamp(0, hi - 1) as u32).0[0] as i64
    };

    let size = (w * h) as usize;
    let mut gx = vec![0i64; size];
    let mut gy = vec![0i64; size];
    let mut mag = vec![0i64; size];
    for y in 0..hi {
        for x in 0..wi {
            let dx = (at(x + 1, y - 1) + 2 * at(x + 1, y) + at(x + 1, y + 1))
                - (at(x - 1, y - 1) + 2 * at(x - 1, y) + at(x - 1, y + 1));
            let dy = (at(x - 1, y + 1) + 2 * at(x, y + 1) + at(x + 1, y + 1))
                - (at(x - 1, y - 1) + 2 * at(x, y - 1) + at(x + 1, y - 1));
            let i = (y * wi + x) as usize;
            gx[i] = dx;
            gy[i] = dy;
            mag[i] = dx.abs() + dy.abs();
        }
    }

    let mag_at = |x: i64, y: i64| -> i64 {
        if x < 0 || y < 0 || x >= wi || y >= hi {
            0
        } else {
            mag[(y * wi + x) as usize]
        }
    };

    let low = low as i64;
    let high = high as i64;

    // 非極大抑制: 0 = 非エッジ, 1 = 弱, 2 = 強
    let mut class = vec![0u8; size];
    for y in 0..hi {
        for x in 0..wi {
            let i = (y * wi + x) as usize;
            let m = mag[i];
            if m <= low {
                continue;
            }
            let (dx, dy) = (gx[i], gy[i]);
            let (ax, ay) = (dx.abs(), dy.abs());

            let is_max = if ay * 1000 < ax * TAN_22_5 {
                m > mag_at(x - 1, y) && m >= mag_at(x + 1, y)
            } else if ay * 1000 > ax * TAN_67_5 {
                m > mag_at(x, y - 1) && m >= mag_at(x, y + 1)
            } else if (dx < 0) == (dy < 0) {
                m > mag_at(x - 1, y - 1) && m >= mag_at(x + 1, y + 1)
            } else {
                m > mag_at(x + 1, y - 1) && m >= mag_at(x - 1, y + 1)
            };

            if is_max {
                class[i] = if m > high { 2 } else { 1 };
            }
        }
    }

    // ヒステリシス
    let mut stack: Vec<(i64, i64)> = Vec::new();
    for y in 0..hi {
        for x in 0..wi {
            if class[(y * wi + x) as usize] == 2 {
                stack.push((x, y));
            }
        }
    }
    while let Some((x, y)) = stack.pop() {
        if edges.get(x as u32, y as u32) {
            continue;
        }
        edges.set(x as u32, y as u32, true);
        for ny in (y - 1)..=(y + 1) {
            for nx in (x - 1)..=(x + 1) {
                if nx < 0 || ny < 0 || nx >= wi || ny >= hi {
                    continue;
                }
                let ni = (ny * wi + nx) as usize;
                if class[ni] > 0 && !edges.get(nx as u32, ny as u32) {
                    stack.push((nx, ny));
                }
            }
        }
    }

    edges
}
