// This file is part of Expmap.
//
// Expmap is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// Expmap is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with Expmap.  If not, see <http://www.gnu.org/licenses/>.
// Round-trip random rotations through both conversion pairs and report the
// worst reconstruction error of each.
use anyhow::{bail, Result};
use expmap::{Backend, ConverterOptions, Guard, Parallel, Real, RotationConverter, Sequential, Tensor};
use log::{debug, info};
use nalgebra::convert;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "verify-rotations",
    about = "Check the rotation conversions by round-tripping random samples"
)]
struct Opt {
    #[structopt(short = "n", long = "count", default_value = "10")]
    /// Number of random axis-angle samples
    count: usize,

    #[structopt(long = "sigma", default_value = "1.0")]
    /// Standard deviation of each axis-angle component
    sigma: f64,

    #[structopt(short = "s", long = "seed")]
    /// Seed the generator for a reproducible run
    seed: Option<u64>,

    #[structopt(long = "single")]
    /// Compute in single precision
    single: bool,

    #[structopt(short = "p", long = "parallel")]
    /// Spread rows across all cores
    parallel: bool,

    #[structopt(short = "g", long = "guard-quaternion")]
    /// Guard the axis-angle to quaternion division at zero rotation
    guard_quaternion: bool,

    #[structopt(short = "t", long = "tolerance")]
    /// Fail if either error exceeds this value
    tolerance: Option<f64>,

    #[structopt(short = "v", long = "verbose")]
    /// Print every sample and trace the conversions
    verbose: bool,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();
    let level = if opt.verbose { "trace" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let options = ConverterOptions::default().with_quaternion_guard(if opt.guard_quaternion {
        Guard::Epsilon
    } else {
        Guard::Unguarded
    });
    let (error1, error2) = match (opt.single, opt.parallel) {
        (false, false) => run::<f64, _>(&opt, Sequential, options)?,
        (false, true) => run::<f64, _>(&opt, Parallel, options)?,
        (true, false) => run::<f32, _>(&opt, Sequential, options)?,
        (true, true) => run::<f32, _>(&opt, Parallel, options)?,
    };

    println!("error1: {}", error1);
    println!("error2: {}", error2);

    if let Some(tolerance) = opt.tolerance {
        // NaN compares false, so test for "not within" rather than "above".
        for (name, error) in [("error1", error1), ("error2", error2)] {
            if !(error <= tolerance) {
                bail!("{} of {} exceeds tolerance {}", name, error, tolerance);
            }
        }
    }
    Ok(())
}

fn run<T: Real, B: Backend>(
    opt: &Opt,
    backend: B,
    options: ConverterOptions,
) -> Result<(f64, f64)> {
    let r = sample_axis_angles::<T>(opt)?;
    if opt.verbose {
        println!("samples:\n{}", r);
    }
    let converter = RotationConverter::new(backend).with_options(options);

    let q = converter.axis_angle_to_quaternion(&r)?;
    let rec_r_1 = converter.quaternion_to_axis_angle(&q)?;
    let error1 = r.max_abs_diff(&rec_r_1)?;
    debug!("quaternion pair: max abs error {}", error1);

    let m = converter.axis_angle_to_rotation_matrix(&r)?;
    let rec_r_2 = converter.rotation_matrix_to_axis_angle(&m)?;
    let error2 = r.max_abs_diff(&rec_r_2)?;
    debug!("rotation matrix pair: max abs error {}", error2);

    Ok((to_f64(error1), to_f64(error2)))
}

fn sample_axis_angles<T: Real>(opt: &Opt) -> Result<Tensor<T>> {
    let mut rng = match opt.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let normal = Normal::new(0f64, opt.sigma)?;
    let data = (0..opt.count * 3)
        .map(|_| convert::<f64, T>(normal.sample(&mut rng)))
        .collect::<Vec<T>>();
    info!("sampled {} axis-angle rows", opt.count);
    Ok(Tensor::new(data, &[opt.count, 3])?)
}

fn to_f64<T: Real>(v: T) -> f64 {
    nalgebra::try_convert::<T, f64>(v).unwrap_or(f64::NAN)
}
