// noise.rs - Random draws and Perlin noise for procedural seeding

use rand::RngCore;
use rand::rngs::OsRng;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NoiseError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl NoiseError {
    fn invalid<S: Into<String>>(msg: S) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

/// Random-number helper with a configurable bit depth.
///
/// Holds no seed of its own: every draw pulls fresh bytes from `source`,
/// which defaults to the operating system's cryptographic generator. Tests
/// inject a seeded generator through [`Rng::with_source`].
#[derive(Debug, Clone)]
pub struct Rng<R = OsRng> {
    bits: u32,
    byte_len: usize,
    rand_max: u64,
    signed_max: i64,
    signed_min: i64,
    source: R,
}

impl Rng<OsRng> {
    /// `bits` must be a multiple of 8 between 8 and 64.
    pub fn new(bits: u32) -> Result<Self, NoiseError> {
        Self::with_source(bits, OsRng)
    }
}

impl<R: RngCore> Rng<R> {
    pub fn with_source(bits: u32, source: R) -> Result<Self, NoiseError> {
        if bits == 0 || bits % 8 != 0 || bits > 64 {
            return Err(NoiseError::invalid(format!(
                "bit width must be a multiple of 8 between 8 and 64, got {bits}"
            )));
        }
        let byte_len = (bits / 8) as usize;
        let rand_max = u64::MAX >> (64 - bits);
        let signed_max = (rand_max / 2) as i64;
        let signed_min = (signed_max as i128 - rand_max as i128) as i64;
        Ok(Self { bits, byte_len, rand_max, signed_max, signed_min, source })
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn rand_max(&self) -> u64 {
        self.rand_max
    }

    pub fn signed_max(&self) -> i64 {
        self.signed_max
    }

    pub fn signed_min(&self) -> i64 {
        self.signed_min
    }

    /// Uniform value in `[0, 1]`: `byte_len` fresh bytes read big-endian,
    /// divided by `rand_max`.
    pub fn random_float(&mut self) -> f64 {
        let mut buf = [0u8; 8];
        let bytes = &mut buf[..self.byte_len];
        self.source.fill_bytes(bytes);
        let value = bytes.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
        value as f64 / self.rand_max as f64
    }

    /// `true` with probability `weight`.
    pub fn random_bool(&mut self, weight: f64) -> Result<bool, NoiseError> {
        if !(0.0..=1.0).contains(&weight) {
            return Err(NoiseError::invalid(format!(
                "weight should be between 0.0 and 1.0, got {weight}"
            )));
        }
        Ok(self.coin(weight))
    }

    fn coin(&mut self, weight: f64) -> bool {
        self.random_float() <= weight
    }

    /// Integer in `[min, max]`, defaulting to the signed range of this bit width.
    pub fn random_int(&mut self, max: Option<i64>, min: Option<i64>) -> Result<i64, NoiseError> {
        let max = max.unwrap_or(self.signed_max);
        let min = min.unwrap_or(self.signed_min);
        if max > self.signed_max {
            return Err(NoiseError::invalid(format!(
                "maximum should be <= {}, got {max}",
                self.signed_max
            )));
        }
        if min < self.signed_min {
            return Err(NoiseError::invalid(format!(
                "minimum should be >= {}, got {min}",
                self.signed_min
            )));
        }
        if min > max {
            return Err(NoiseError::invalid(format!("minimum {min} exceeds maximum {max}")));
        }
        let span = max as f64 - min as f64;
        Ok((self.random_float() * span + min as f64).round() as i64)
    }

    /// Unsigned integer in `[min, max]`, defaulting to `[0, rand_max]`.
    pub fn random_uint(&mut self, max: Option<u64>, min: Option<u64>) -> Result<u64, NoiseError> {
        let max = max.unwrap_or(self.rand_max);
        let min = min.unwrap_or(0);
        if max > self.rand_max {
            return Err(NoiseError::invalid(format!(
                "maximum should be <= {}, got {max}",
                self.rand_max
            )));
        }
        if min > max {
            return Err(NoiseError::invalid(format!("minimum {min} exceeds maximum {max}")));
        }
        let span = (max - min) as f64;
        Ok((self.random_float() * span + min as f64).round() as u64)
    }
}

/// Ken Perlin's reference permutation.
const PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// Third coordinate of every 2D sample.
const NOISE_Z: f64 = 10.0;

#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

#[inline]
fn grad(hash: u8, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

/// 2D slice of 3D Perlin noise over a fixed or coin-shuffled permutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Perlin {
    permutation: [u8; 256],
    table: [u8; 512],
}

impl Default for Perlin {
    fn default() -> Self {
        Self::from_permutation(PERMUTATION)
    }
}

impl Perlin {
    /// Noise over the canonical permutation. Fully deterministic.
    pub fn new() -> Self {
        Self::default()
    }

    /// Noise over the canonical permutation reordered by coin flips.
    ///
    /// The reorder is a merge sort whose comparator is a fair coin, so the
    /// result is always a permutation but not a uniform shuffle.
    pub fn randomized<R: RngCore>(rng: &mut Rng<R>) -> Self {
        let mut permutation = PERMUTATION;
        coin_merge_sort(&mut permutation, rng);
        Self::from_permutation(permutation)
    }

    fn from_permutation(permutation: [u8; 256]) -> Self {
        let mut table = [0u8; 512];
        table[..256].copy_from_slice(&permutation);
        table[256..].copy_from_slice(&permutation);
        Self { permutation, table }
    }

    pub fn permutation(&self) -> &[u8; 256] {
        &self.permutation
    }

    #[inline]
    fn p(&self, idx: usize) -> usize {
        self.table[idx] as usize
    }

    /// Samples the noise at `(x, y, 10)`.
    ///
    /// `z` is blended at its lattice value rather than its fractional part,
    /// which keeps integer-coordinate samples away from zero.
    pub fn noise(&self, x: f64, y: f64) -> f64 {
        let z = NOISE_Z;
        let xi = (x.floor() as i64 & 255) as usize;
        let yi = (y.floor() as i64 & 255) as usize;
        let zi = (z.floor() as i64 & 255) as usize;

        let x = x - x.floor();
        let y = y - y.floor();

        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        let a = self.p(xi) + yi;
        let aa = self.p(a) + zi;
        let ab = self.p(a + 1) + zi;
        let b = self.p(xi + 1) + yi;
        let ba = self.p(b) + zi;
        let bb = self.p(b + 1) + zi;

        let t = &self.table;
        lerp(
            w,
            lerp(
                v,
                lerp(u, grad(t[aa], x, y, z), grad(t[ba], x - 1.0, y, z)),
                lerp(u, grad(t[ab], x, y - 1.0, z), grad(t[bb], x - 1.0, y - 1.0, z)),
            ),
            lerp(
                v,
                lerp(u, grad(t[aa + 1], x, y, z - 1.0), grad(t[ba + 1], x - 1.0, y, z - 1.0)),
                lerp(
                    u,
                    grad(t[ab + 1], x, y - 1.0, z - 1.0),
                    grad(t[bb + 1], x - 1.0, y - 1.0, z - 1.0),
                ),
            ),
        )
    }
}

fn coin_merge_sort<R: RngCore>(values: &mut [u8], rng: &mut Rng<R>) {
    if values.len() < 2 {
        return;
    }
    let mid = values.len() / 2;
    coin_merge_sort(&mut values[..mid], rng);
    coin_merge_sort(&mut values[mid..], rng);

    let (left, right) = values.split_at(mid);
    let mut merged = Vec::with_capacity(values.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        if rng.coin(0.5) {
            merged.push(left[i]);
            i += 1;
        } else {
            merged.push(right[j]);
            j += 1;
        }
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);
    values.copy_from_slice(&merged);
}
