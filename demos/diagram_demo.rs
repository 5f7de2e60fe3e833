//! Builds a diagram, then sweeps the point count the way a slider would
//!
//! Run with `RUST_LOG=debug` to see per-build statistics and timings.

use rust_voronoi_cells::*;

fn main() -> Result<()> {
    env_logger::init();

    let config = DiagramConfigBuilder::new()
        .seed(42)
        .point_count(DEFAULT_POINT_COUNT)?
        .build()?;

    let mut diagram = VoronoiDiagram::generate(config)?;
    print_summary(&diagram);

    for cell in diagram.cells() {
        println!(
            "  cell {:2}: center ({:6.2}, {:6.2}, {:6.2}), {:2} vertices, reach {:.2}",
            cell.id,
            cell.center.x,
            cell.center.y,
            cell.center.z,
            cell.vertex_count(),
            cell.max_vertex_distance()
        );
    }

    println!("\n=== Sweeping point count ===");
    for requested in [3, 5, 8, 12, 40] {
        let used = diagram.set_point_count(requested)?;
        print_summary(&diagram);
        if used != requested {
            println!("  (requested {}, clamped to {})", requested, used);
        }
    }

    Ok(())
}

fn print_summary(diagram: &VoronoiDiagram) {
    let stats = diagram.stats();
    println!(
        "{} generators -> {} cells ({} dropped), {} triples: {} accepted, {} degenerate, {} invalid, {} out of bounds, {} merged, {} violations",
        diagram.point_count(),
        diagram.cell_count(),
        stats.cells_dropped(),
        stats.totals.triples,
        stats.totals.accepted,
        stats.totals.degenerate,
        stats.totals.invalid,
        stats.totals.out_of_bounds,
        stats.totals.duplicates,
        diagram.check_validity().len(),
    );
}
