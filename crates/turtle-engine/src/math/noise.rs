use std::sync::LazyLock;

use noise::{NoiseFn, Perlin, Simplex, Value};

/// Fixed seed: noise is a pure function of its input.
const SEED: u32 = 1337;

/// Input coordinates are scaled by this before sampling, so neighbouring
/// pixels produce smoothly varying values.
const FREQUENCY: f64 = 0.01;

static PERLIN: LazyLock<Perlin> = LazyLock::new(|| Perlin::new(SEED));
static SIMPLEX: LazyLock<Simplex> = LazyLock::new(|| Simplex::new(SEED));
static VALUE: LazyLock<Value> = LazyLock::new(|| Value::new(SEED));

/// Gradient or lattice algorithm used by [`noise2`] and [`noise3`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum NoiseType {
    Perlin,
    #[default]
    Simplex,
    Value,
}

/// Coherent noise at `(x, y)`, in `[0, 1]`.
pub fn noise2(x: f32, y: f32, kind: NoiseType) -> f32 {
    let p = [x as f64 * FREQUENCY, y as f64 * FREQUENCY];
    let raw = match kind {
        NoiseType::Perlin => PERLIN.get(p),
        NoiseType::Simplex => SIMPLEX.get(p),
        NoiseType::Value => VALUE.get(p),
    };
    to_unit(raw)
}

/// Coherent noise at `(x, y, z)`, in `[0, 1]`.
pub fn noise3(x: f32, y: f32, z: f32, kind: NoiseType) -> f32 {
    let p = [x as f64 * FREQUENCY, y as f64 * FREQUENCY, z as f64 * FREQUENCY];
    let raw = match kind {
        NoiseType::Perlin => PERLIN.get(p),
        NoiseType::Simplex => SIMPLEX.get(p),
        NoiseType::Value => VALUE.get(p),
    };
    to_unit(raw)
}

/// Maps the generators' nominal `[-1, 1]` output onto `[0, 1]`.
fn to_unit(raw: f64) -> f32 {
    ((raw + 1.0) * 0.5).clamp(0.0, 1.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [NoiseType; 3] = [NoiseType::Perlin, NoiseType::Simplex, NoiseType::Value];

    #[test]
    fn output_stays_in_unit_range() {
        for kind in KINDS {
            for i in 0..200 {
                let (x, y) = (i as f32 * 7.3, i as f32 * -3.1);
                let v = noise2(x, y, kind);
                assert!((0.0..=1.0).contains(&v), "{kind:?} {v}");
                let v = noise3(x, y, i as f32, kind);
                assert!((0.0..=1.0).contains(&v), "{kind:?} {v}");
            }
        }
    }

    #[test]
    fn same_input_gives_same_value() {
        for kind in KINDS {
            assert_eq!(noise2(12.5, 40.0, kind), noise2(12.5, 40.0, kind));
            assert_eq!(noise3(1.0, 2.0, 3.0, kind), noise3(1.0, 2.0, 3.0, kind));
        }
    }

    #[test]
    fn neighbouring_pixels_vary_smoothly() {
        for kind in KINDS {
            let a = noise2(100.0, 100.0, kind);
            let b = noise2(101.0, 100.0, kind);
            assert!((a - b).abs() < 0.1, "{kind:?}: {a} vs {b}");
        }
    }

    #[test]
    fn out_of_range_raw_values_are_clamped() {
        assert_eq!(to_unit(-1.5), 0.0);
        assert_eq!(to_unit(1.5), 1.0);
        assert_eq!(to_unit(0.0), 0.5);
    }

    #[test]
    fn simplex_is_the_default() {
        assert_eq!(NoiseType::default(), NoiseType::Simplex);
    }
}
