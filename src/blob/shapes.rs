//! Procedural base meshes.

use std::collections::HashMap;

use glam::Vec3;

use super::mesh::TriangleSoup;

/// Golden ratio, used for the icosahedron corners
const PHI: f32 = 1.618_034;

/// Icosahedron faces, counter-clockwise seen from outside
const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Generates a unit icosphere centered at the origin.
///
/// Each subdivision level splits every triangle into four, pushing the new
/// edge midpoints out to the unit sphere. Midpoints are computed once per
/// edge, so corners shared between triangles carry bit-identical positions
/// in the flattened output.
///
/// Triangle count is `20 * 4^subdivisions`.
///
/// # Example
/// ```
/// use vasaro::blob::icosphere;
/// let mesh = icosphere(1);
/// assert_eq!(mesh.triangle_count(), 80);
/// ```
pub fn icosphere(subdivisions: u32) -> TriangleSoup {
    let mut positions: Vec<Vec3> = [
        (-1.0, PHI, 0.0),
        (1.0, PHI, 0.0),
        (-1.0, -PHI, 0.0),
        (1.0, -PHI, 0.0),
        (0.0, -1.0, PHI),
        (0.0, 1.0, PHI),
        (0.0, -1.0, -PHI),
        (0.0, 1.0, -PHI),
        (PHI, 0.0, -1.0),
        (PHI, 0.0, 1.0),
        (-PHI, 0.0, -1.0),
        (-PHI, 0.0, 1.0),
    ]
    .into_iter()
    .map(|(x, y, z)| Vec3::new(x, y, z).normalize())
    .collect();

    let mut faces = ICOSAHEDRON_FACES.to_vec();

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut next = Vec::with_capacity(faces.len() * 4);

        for [a, b, c] in faces {
            let ab = midpoint(&mut positions, &mut midpoints, a, b);
            let bc = midpoint(&mut positions, &mut midpoints, b, c);
            let ca = midpoint(&mut positions, &mut midpoints, c, a);

            next.push([a, ab, ca]);
            next.push([b, bc, ab]);
            next.push([c, ca, bc]);
            next.push([ab, bc, ca]);
        }

        faces = next;
    }

    TriangleSoup::from_triangles(
        faces
            .iter()
            .map(|face| face.map(|index| positions[index as usize])),
    )
}

/// Index of the unit-sphere midpoint of edge (a, b), created on first use
fn midpoint(
    positions: &mut Vec<Vec3>,
    cache: &mut HashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
) -> u32 {
    let edge = if a < b { (a, b) } else { (b, a) };
    *cache.entry(edge).or_insert_with(|| {
        let mid = (positions[edge.0 as usize] + positions[edge.1 as usize]) * 0.5;
        positions.push(mid.normalize());
        (positions.len() - 1) as u32
    })
}
