//! Closed-form placements: random, circular and shell.

use std::f64::consts::TAU;

use rand::Rng;

use crate::error::{Error, Result};
use crate::graph::{Layout, LayoutGraph, check_graph};

/// Each coordinate drawn uniformly from `[0, 1)`.
pub fn random_layout<G, R>(graph: &G, rng: &mut R) -> Result<Layout>
where
    G: LayoutGraph + ?Sized,
    R: Rng,
{
    let n = check_graph(graph)?;
    if n == 1 {
        return Ok(Layout::origin());
    }
    let mut layout = Layout::zeros(n);
    for i in 0..n {
        layout.x[i] = rng.random::<f64>();
        layout.y[i] = rng.random::<f64>();
    }
    Ok(layout)
}

/// Vertices evenly spaced on the unit circle, vertex `i` at angle `2*pi*i / N`.
pub fn circular_layout<G>(graph: &G) -> Result<Layout>
where
    G: LayoutGraph + ?Sized,
{
    let n = check_graph(graph)?;
    if n == 1 {
        return Ok(Layout::origin());
    }
    let mut layout = Layout::zeros(n);
    place_on_circle(&mut layout, &(0..n).collect::<Vec<_>>(), 1.0);
    Ok(layout)
}

/// Places each group of `nlist` on its own concentric circle.
///
/// The first circle has radius `0.0` when its group has a single vertex and `1.0` otherwise; each
/// following circle is `1.0` further out. `None` places all vertices on one circle. Vertices not
/// named by any group stay at the origin.
pub fn shell_layout<G>(graph: &G, nlist: Option<&[Vec<usize>]>) -> Result<Layout>
where
    G: LayoutGraph + ?Sized,
{
    let n = check_graph(graph)?;
    let all: [Vec<usize>; 1];
    let shells = match nlist {
        Some(shells) => {
            check_shells(shells, n)?;
            shells
        }
        None => {
            all = [(0..n).collect()];
            &all[..]
        }
    };
    if n == 1 {
        return Ok(Layout::origin());
    }

    let mut layout = Layout::zeros(n);
    let mut radius = if shells[0].len() == 1 { 0.0 } else { 1.0 };
    for shell in shells {
        place_on_circle(&mut layout, shell, radius);
        radius += 1.0;
    }
    Ok(layout)
}

fn place_on_circle(layout: &mut Layout, members: &[usize], radius: f64) {
    let step = TAU / members.len() as f64;
    for (k, &v) in members.iter().enumerate() {
        let theta = step * k as f64;
        layout.x[v] = radius * theta.cos();
        layout.y[v] = radius * theta.sin();
    }
}

fn check_shells(shells: &[Vec<usize>], n: usize) -> Result<()> {
    if shells.is_empty() {
        return Err(Error::invalid("shell list must contain at least one shell"));
    }
    let mut seen = vec![false; n];
    for (s, shell) in shells.iter().enumerate() {
        if shell.is_empty() {
            return Err(Error::invalid(format!("shell {s} is empty")));
        }
        for &v in shell {
            if v >= n {
                return Err(Error::invalid(format!(
                    "shell {s} names vertex {v}, outside 0..{n}"
                )));
            }
            if std::mem::replace(&mut seen[v], true) {
                return Err(Error::invalid(format!(
                    "vertex {v} appears in more than one shell position"
                )));
            }
        }
    }
    Ok(())
}
