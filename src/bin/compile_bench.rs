use knotpd::{Diagram, EditError};
use std::time::Instant;

// Star polygon {n/k}: n points on a circle, point i joined to point i + k.
// With gcd(n, k) = 1 this is a single closed curve with n * (k - 1) crossings.
fn build_star(n: usize, k: usize) -> Result<Diagram, EditError> {
    let mut g = Diagram::new();
    let r = 40.0 * n as f32;
    let ids = (0..n)
        .map(|i| {
            let a = i as f32 * std::f32::consts::TAU / n as f32;
            g.add_node(r * a.cos(), r * a.sin())
        })
        .collect::<Result<Vec<_>, _>>()?;
    for i in 0..n {
        let _ = g.add_edge(ids[i], ids[(i + k) % n]);
    }
    let _ = g.set_base(ids[0]);
    let _ = g.set_direction(ids[k % n]);
    Ok(g)
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 { a } else { gcd(b, a % b) }
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() { return 0.0; }
    let idx = ((sorted.len() as f64 - 1.0) * p).round() as usize;
    sorted[idx.min(sorted.len()-1)]
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut n = 101usize;
    let mut k = 3usize;
    let mut runs = 50usize;
    let mut assert_ms: Option<f64> = None;
    for a in &args[1..] {
        if let Some(val)=a.strip_prefix("--nodes=") { if let Ok(v)=val.parse() { n=v; } }
        else if let Some(val)=a.strip_prefix("--step=") { if let Ok(v)=val.parse() { k=v; } }
        else if let Some(val)=a.strip_prefix("--runs=") { if let Ok(v)=val.parse() { runs=v; } }
        else if let Some(val)=a.strip_prefix("--assert-ms=") { if let Ok(v)=val.parse() { assert_ms=Some(v); } }
    }
    if n < 5 || k < 2 || k >= n / 2 || gcd(n, k) != 1 {
        eprintln!("need n >= 5, 2 <= k < n/2 and gcd(n, k) = 1");
        std::process::exit(2);
    }

    let g = match build_star(n, k) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("cannot build diagram: [{}] {}", e.code(), e);
            std::process::exit(2);
        }
    };
    let crossings = match g.compile() {
        Ok(c) => c.crossing_count(),
        Err(e) => {
            eprintln!("compile failed: [{}] {}", e.code(), e);
            std::process::exit(1);
        }
    };

    let mut times_ms: Vec<f64> = Vec::with_capacity(runs);
    let start_all = Instant::now();
    for _ in 0..runs {
        let t0 = Instant::now();
        let _ = g.compile();
        times_ms.push(t0.elapsed().as_secs_f64() * 1000.0);
    }
    let dur_all = start_all.elapsed().as_secs_f64() * 1000.0;
    times_ms.sort_by(|a, b| a.total_cmp(b));
    let med = percentile(&times_ms, 0.5);
    let p90 = percentile(&times_ms, 0.9);
    println!("nodes={} step={} crossings={} runs={} total_ms={:.3} median_ms={:.4} p90_ms={:.4}", n, k, crossings, runs, dur_all, med, p90);
    if let Some(th) = assert_ms { if med > th { eprintln!("FAIL: median {:.4} ms > threshold {:.3} ms", med, th); std::process::exit(1); } }
}
