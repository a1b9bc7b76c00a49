use super::canny::EdgeMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// 確率的ハフ変換のパラメータ
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoughParams {
    /// 距離分解能（px）
    pub rho: f64,
    /// 角度分解能（rad）
    pub theta: f64,
    /// 投票数の閾値
    pub threshold: u32,
    /// 線分として採用する最小長（px）
    pub min_line_length: u32,
    /// 同一線分とみなす最大ギャップ（px）
    pub max_line_gap: u32,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            rho: 1.0,
            theta: PI / 180.0,
            threshold: 80,
            min_line_length: 0,
            max_line_gap: 10,
        }
    }
}

/// 検出された線分（端点は画素座標）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSegment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl LineSegment {
    /// 水平からの角度（度）。垂直線は None
    ///
    /// 画像座標系（y下向き）なので、正の角度は右下がり。
    pub fn angle_degrees(&self) -> Option<f64> {
        let dx = self.x2 - self.x1;
        if dx == 0 {
            return None;
        }
        let dy = self.y2 - self.y1;
        Some((dy as f64 / dx as f64).atan().to_degrees())
    }
}

const SHIFT: u32 = 16;
const SEED: u64 = 0x5EED_0F_1E5;

/// 線分の走査（固定小数点で検出方向に1画素ずつ進む）
struct Stepper {
    x0: i64,
    y0: i64,
    dx: i64,
    dy: i64,
    /// x方向を主軸に進むか
    x_major: bool,
}

impl Stepper {
    fn new(x: i32, y: i32, a: f64, b: f64) -> Self {
        let one = (1i64 << SHIFT) as f64;
        let half = 1i64 << (SHIFT - 1);
        if a.abs() > b.abs() {
            Self {
                x0: x as i64,
                y0: ((y as i64) << SHIFT) + half,
                dx: if a > 0.0 { 1 } else { -1 },
                dy: (b * one / a.abs()).round_ties_even() as i64,
                x_major: true,
            }
        } else {
            Self {
                x0: ((x as i64) << SHIFT) + half,
                y0: y as i64,
                dx: (a * one / b.abs()).round_ties_even() as i64,
                dy: if b > 0.0 { 1 } else { -1 },
                x_major: false,
            }
        }
    }

    /// `direction` 方向に `k` ステップ進んだ画素
    fn at(&self, k: i64, direction: i64) -> (i64, i64) {
        let x = self.x0 + direction * k * self.dx;
        let y = self.y0 + direction * k * self.dy;
        if self.x_major {
            (x, y >> SHIFT)
        } else {
            (x >> SHIFT, y)
        }
    }
}

/// 確率的ハフ変換で線分を検出
///
/// エッジ画素をシード固定の乱数順で1つずつ投票し、閾値に達した角度方向へ
/// 両側に走査して線分を切り出す。走査は通過する画素そのものだけを見る
/// （隣接画素は数えない）。走査で通過した画素は以降の投票から除外する。
/// 同じ入力には常に同じ線分列を返す。
pub fn hough_lines_p(edges: &EdgeMap, params: &HoughParams) -> Vec<LineSegment> {
    let width = edges.width() as i64;
    let height = edges.height() as i64;
    if width == 0 || height == 0 || params.rho <= 0.0 || params.theta <= 0.0 {
        return Vec::new();
    }

    let irho = 1.0 / params.rho;
    let num_angle = (PI / params.theta).round().max(1.0) as usize;
    let num_rho = (((width + height) * 2 + 1) as f64 / params.rho).round() as usize;
    let rho_offset = (num_rho as i64 - 1) / 2;
    let trig: Vec<(f64, f64)> = (0..num_angle)
        .map(|n| {
            let t = n as f64 * params.theta;
            (t.cos() * irho, t.sin() * irho)
        })
        .collect();

    let mut accum = vec![0i32; num_angle * num_rho];
    let mut mask: Vec<bool> = edges.as_slice().to_vec();
    let mut points: Vec<(i32, i32)> = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if mask[(y * width + x) as usize] {
                points.push((x as i32, y as i32));
            }
        }
    }

    let in_bounds = |x: i64, y: i64| x >= 0 && y >= 0 && x < width && y < height;
    let rho_index = |x: i64, y: i64, (c, s): (f64, f64)| -> usize {
        ((x as f64 * c + y as f64 * s).round_ties_even() as i64 + rho_offset) as usize
    };

    let min_len = params.min_line_length as i64;
    let max_gap = params.max_line_gap as i64;
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut lines = Vec::new();
    let mut remaining = points.len();

    while remaining > 0 {
        let idx = rng.random_range(0..remaining);
        let (px, py) = points[idx];
        points.swap(idx, remaining - 1);
        remaining -= 1;

        if !mask[(py as i64 * width + px as i64) as usize] {
            continue;
        }

        // 投票
        let mut max_val = params.threshold as i32 - 1;
        let mut max_n = None;
        for (n, &t) in trig.iter().enumerate() {
            let cell = &mut accum[n * num_rho + rho_index(px as i64, py as i64, t)];
            *cell += 1;
            if *cell > max_val {
                max_val = *cell;
                max_n = Some(n);
            }
        }
        let Some(max_n) = max_n else {
            continue;
        };

        // 法線 (cos, sin) に垂直な方向 (-sin, cos) へ走査
        let (c, s) = trig[max_n];
        let stepper = Stepper::new(px, py, -s, c);

        let mut ends = [(px as i64, py as i64); 2];
        for (end, direction) in ends.iter_mut().zip([1i64, -1]) {
            let mut gap = 0;
            for k in 0.. {
                let (x, y) = stepper.at(k, direction);
                if !in_bounds(x, y) {
                    break;
                }
                if mask[(y * width + x) as usize] {
                    gap = 0;
                    *end = (x, y);
                } else {
                    gap += 1;
                    if gap > max_gap {
                        break;
                    }
                }
            }
        }

        let good_line = (ends[1].0 - ends[0].0).abs() >= min_len
            || (ends[1].1 - ends[0].1).abs() >= min_len;

        // 走査した画素をマスクから除去（採用時は投票も取り消す）
        for (&end, direction) in ends.iter().zip([1i64, -1]) {
            for k in 0.. {
                let (x, y) = stepper.at(k, direction);
                if !in_bounds(x, y) {
                    break;
                }
                let i = (y * width + x) as usize;
                if mask[i] {
                    if good_line {
                        for (n, &t) in trig.iter().enumerate() {
                            accum[n * num_rho + rho_index(x, y, t)] -= 1;
                        }
                    }
                    mask[i] = false;
                }
                if (x, y) == end {
                    break;
                }
            }
        }

        if good_line {
            lines.push(LineSegment {
                x1: ends[0].0 as i32,
                y1: ends[0].1 as i32,
                x2: ends[1].0 as i32,
                y2: ends[1].1 as i32,
            });
        }
    }

    lines
}
