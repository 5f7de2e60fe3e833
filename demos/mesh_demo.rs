//! Demonstration of mesh generation

use rust_voronoi_cells::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("Generating diagram...");

    let config = DiagramConfigBuilder::new()
        .seed(7)
        .point_count(12)?
        .build()?;

    let diagram = VoronoiDiagram::generate(config)?;
    println!("Generated {} cells", diagram.cell_count());

    let hulls = diagram.hulls();
    let volume: f64 = hulls.iter().map(|h| h.volume()).sum();
    println!("Hulls: {} (total volume {:.1})", hulls.len(), volume);

    let mesh = generate_mesh(&diagram, &UniformColorMapper::default());
    println!("\nCell mesh statistics:");
    println!("  Vertices: {}", mesh.vertex_count());
    println!("  Triangles: {}", mesh.triangle_count());

    let scene = generate_scene_mesh(&diagram, &PaletteColorMapper::default());
    println!("\nScene mesh (cells, markers, bounding sphere):");
    println!("  Vertices: {}", scene.vertex_count());
    println!("  Triangles: {}", scene.triangle_count());

    let mem = scene.positions.len() * 12
        + scene.normals.len() * 12
        + scene.colors.len() * 16
        + scene.indices.len() * 4;
    println!("  Memory: {} bytes ({:.2} KB)", mem, mem as f32 / 1024.0);

    Ok(())
}
