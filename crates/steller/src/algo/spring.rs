//! Fruchterman-Reingold force-directed layout.
//!
//! Every ordered pair of distinct vertices interacts: adjacent pairs feel `d / K - K^2 / d^2`
//! (spring plus repulsion), all other pairs only the repulsive `-K^2 / d^2`, where
//! `K = c * sqrt(4 / N)`. Forces are applied after each full sweep with a displacement cap that
//! cools as `initial_temperature / iteration`. The iteration count is fixed; there is no
//! convergence test.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;

use crate::algo::SpringOptions;
use crate::error::Result;
use crate::graph::{Layout, LayoutGraph, check_graph};
use crate::normalize::rescale_layout;

/// Runs the simulation with a generator seeded from `opts.random_seed`.
pub fn spring_layout<G>(graph: &G, opts: &SpringOptions) -> Result<Layout>
where
    G: LayoutGraph + ?Sized,
{
    let mut rng = StdRng::seed_from_u64(opts.random_seed);
    spring_layout_with_rng(graph, opts, &mut rng)
}

/// Runs the simulation, drawing any missing initial positions from `rng`.
pub fn spring_layout_with_rng<G, R>(graph: &G, opts: &SpringOptions, rng: &mut R) -> Result<Layout>
where
    G: LayoutGraph + ?Sized,
    R: Rng,
{
    let n = check_graph(graph)?;
    opts.validate(n)?;
    if n == 1 {
        return Ok(Layout::origin());
    }

    let mut pos = match &opts.initial_positions {
        Some((x, y)) => Layout {
            x: x.clone(),
            y: y.clone(),
        },
        None => random_square(n, rng),
    };

    let adjacency = undirected_adjacency(graph);
    let k = opts.c * (4.0 / n as f64).sqrt();
    let mut sim = ForceState::new(n);

    for iter in 1..=opts.max_iter {
        sim.accumulate(&pos, &adjacency, k);
        let temperature = opts.initial_temperature / iter as f64;
        sim.apply(&mut pos, temperature);
    }

    tracing::debug!(
        vertices = n,
        edges = adjacency.len(),
        iterations = opts.max_iter,
        "spring layout finished"
    );

    if opts.rescale {
        rescale_layout(&mut pos);
    }
    pos.ensure_finite("spring layout")?;
    Ok(pos)
}

fn random_square<R: Rng>(n: usize, rng: &mut R) -> Layout {
    let mut layout = Layout::zeros(n);
    for i in 0..n {
        layout.x[i] = rng.random_range(-1.0..1.0);
        layout.y[i] = rng.random_range(-1.0..1.0);
    }
    layout
}

/// Unordered vertex pairs joined by at least one edge in either direction.
fn undirected_adjacency<G: LayoutGraph + ?Sized>(graph: &G) -> FxHashSet<(usize, usize)> {
    graph
        .edges()
        .filter(|(s, t)| s != t)
        .map(|(s, t)| (s.min(t), s.max(t)))
        .collect()
}

/// Per-iteration force accumulators, reset on every sweep.
struct ForceState {
    fx: Vec<f64>,
    fy: Vec<f64>,
}

impl ForceState {
    fn new(n: usize) -> Self {
        Self {
            fx: vec![0.0; n],
            fy: vec![0.0; n],
        }
    }

    fn accumulate(&mut self, pos: &Layout, adjacency: &FxHashSet<(usize, usize)>, k: f64) {
        let k2 = k * k;
        let n = pos.len();
        self.fx.fill(0.0);
        self.fy.fill(0.0);

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let dx = pos.x[j] - pos.x[i];
                let dy = pos.y[j] - pos.y[i];
                let d2 = dx * dx + dy * dy;
                // Coincident vertices have no direction to push along.
                if d2 == 0.0 {
                    continue;
                }
                let d = d2.sqrt();
                let f = if adjacency.contains(&(i.min(j), i.max(j))) {
                    d / k - k2 / d2
                } else {
                    -k2 / d2
                };
                self.fx[i] += f * dx;
                self.fy[i] += f * dy;
            }
        }
    }

    /// Moves each vertex along its net force, capped at `temperature`.
    fn apply(&self, pos: &mut Layout, temperature: f64) {
        for i in 0..pos.len() {
            let (fx, fy) = (self.fx[i], self.fy[i]);
            let magnitude = (fx * fx + fy * fy).sqrt();
            // Balanced vertex: nothing to scale.
            if magnitude == 0.0 {
                continue;
            }
            let scale = magnitude.min(temperature) / magnitude;
            pos.x[i] += fx * scale;
            pos.y[i] += fy * scale;
        }
    }
}
