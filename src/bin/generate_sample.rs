use std::fmt::Write as _;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const NULL: f64 = -999.25;
const STEP: f64 = 0.5;
const TOP: f64 = 1500.0;
const SAMPLES: usize = 301;

/// Sand bodies within the interval, as (top, base) depths.
const SANDS: [(f64, f64); 3] = [(1512.0, 1528.0), (1560.0, 1572.5), (1610.0, 1634.0)];

fn in_sand(depth: f64) -> bool {
    SANDS.iter().any(|&(top, base)| depth >= top && depth < base)
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let stop = TOP + (SAMPLES - 1) as f64 * STEP;

    let mut las = String::new();
    las.push_str("~Version\n");
    las.push_str("VERS.          2.0 : CWLS LAS 2.0\n");
    las.push_str("WRAP.          NO  : One line per depth step\n");
    las.push_str("~Well\n");
    let _ = writeln!(las, "STRT.M  {TOP:10.4} : START DEPTH");
    let _ = writeln!(las, "STOP.M  {stop:10.4} : STOP DEPTH");
    let _ = writeln!(las, "STEP.M  {STEP:10.4} : STEP");
    let _ = writeln!(las, "NULL.   {NULL:10.2} : NULL VALUE");
    las.push_str("WELL.   COYOTE-1       : WELL NAME\n");
    las.push_str("FLD .   SYNTHETIC      : FIELD\n");
    las.push_str("~Curve\n");
    las.push_str("DEPT.M    : Depth\n");
    las.push_str("GR  .GAPI : Gamma Ray\n");
    las.push_str("RT  .OHMM : Deep Resistivity\n");
    las.push_str("NPHI.V/V  : Neutron Porosity\n");
    las.push_str("~Ascii\n");

    for i in 0..SAMPLES {
        let depth = TOP + i as f64 * STEP;
        let sand = in_sand(depth);

        let mut gr = if sand {
            rng.gauss(28.0, 4.0)
        } else {
            rng.gauss(95.0, 6.0)
        };
        let mut rt = if sand {
            rng.gauss(35.0, 10.0).max(5.0)
        } else {
            rng.gauss(1.6, 0.3).max(0.2)
        };
        let mut nphi = if sand {
            rng.gauss(0.24, 0.012)
        } else {
            rng.gauss(0.32, 0.015)
        };

        // Occasional gaps, like a real tool pulling off the borehole wall.
        if i % 97 == 13 {
            gr = NULL;
        }
        if i % 113 == 41 {
            rt = NULL;
        }
        if i % 89 == 7 {
            nphi = NULL;
        }

        let _ = writeln!(las, "{depth:9.2} {gr:9.2} {rt:9.3} {nphi:9.4}");
    }

    let output_path = "sample_well.las";
    std::fs::write(output_path, &las).expect("Failed to write sample LAS");
    println!("Wrote {SAMPLES} depth samples (GR, RT, NPHI) to {output_path}");
}
