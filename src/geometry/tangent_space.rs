use nalgebra_glm::{cross, length, normalize, vec3, TVec2, TVec3};
use crate::geometry::vertex::Vertex;

/// Below this magnitude the UV determinant is treated as zero and the UV mapping as degenerate
const UV_DETERMINANT_EPSILON: f32 = 1e-8;

/// Sine of the smallest angle between two edges for them to still span a plane
const COLLINEAR_SINE_EPSILON: f32 = 1e-6;

/// Per-triangle basis used to move normal map samples into model space
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TangentBasis
{
    pub tangent: TVec3<f32>,
    pub binormal: TVec3<f32>,
    /// True when the UV derivatives could not be used and a fallback basis was produced instead
    pub degenerate: bool,
}

/// Computes the tangent and binormal of a triangle from its positions and texture coordinates
///
/// When the UV mapping of the triangle is degenerate (the UV determinant is zero, or the result is
/// not finite), the tangent follows the first non-zero edge and the binormal completes a basis
/// with the geometric normal. A triangle with no area falls back to the X and Y axes
pub fn compute_triangle_basis(positions: [TVec3<f32>; 3], tex_coords: [TVec2<f32>; 3]) -> TangentBasis
{
    let [p0, p1, p2] = positions;
    let [uv0, uv1, uv2] = tex_coords;

    let edge1 = p1 - p0;
    let edge2 = p2 - p0;

    let du1 = uv1.x - uv0.x;
    let dv1 = uv1.y - uv0.y;
    let du2 = uv2.x - uv0.x;
    let dv2 = uv2.y - uv0.y;

    let determinant = du1 * dv2 - du2 * dv1;

    if determinant.abs() >= UV_DETERMINANT_EPSILON
    {
        let r = 1.0 / determinant;
        let tangent = (edge1 * dv2 - edge2 * dv1) * r;
        let binormal = (edge2 * du1 - edge1 * du2) * r;

        if let (Some(tangent), Some(binormal)) = (unit(&tangent), unit(&binormal))
        {
            return TangentBasis { tangent, binormal, degenerate: false };
        }
    }

    fallback_basis(&edge1, &edge2)
}

/// Assigns every vertex of every triangle the basis of that triangle. The basis is flat: a vertex
/// shared between triangles keeps the basis of the last triangle that references it. Vertices
/// without an authored normal receive the triangle's geometric normal the same way, so the normal
/// and the tangent of a vertex always come from the same triangle
///
/// `vertices` - the vertices to write the tangent space into
/// `indices` - triangle list indexing into `vertices`; must hold whole triangles and be in bounds
///
/// Returns the number of triangles that needed the fallback basis
pub fn apply_flat_tangents(vertices: &mut [Vertex], indices: &[u32]) -> usize
{
    let authored_normals: Vec<bool> = vertices.iter().map(Vertex::has_normal).collect();
    let mut degenerate_triangles = 0;

    for triangle in indices.chunks_exact(3)
    {
        let [i0, i1, i2] = [triangle[0] as usize, triangle[1] as usize, triangle[2] as usize];

        let positions = [vertices[i0].position(), vertices[i1].position(), vertices[i2].position()];
        let tex_coords = [vertices[i0].tex_coord(), vertices[i1].tex_coord(), vertices[i2].tex_coord()];

        let basis = compute_triangle_basis(positions, tex_coords);
        if basis.degenerate
        {
            degenerate_triangles += 1;
        }

        let face_normal = geometric_normal(&positions);

        for i in [i0, i1, i2].iter()
        {
            let vertex = &mut vertices[*i];
            vertex.tangent = basis.tangent.into();
            vertex.binormal = basis.binormal.into();

            if !authored_normals[*i]
            {
                if let Some(normal) = face_normal
                {
                    vertex.normal = normal.into();
                }
            }
        }
    }

    degenerate_triangles
}

/// Unit normal of the triangle, or `None` if the triangle has no area. The test is relative to the
/// edge lengths, so small triangles still get a normal
pub fn geometric_normal(positions: &[TVec3<f32>; 3]) -> Option<TVec3<f32>>
{
    plane_normal(&(positions[1] - positions[0]), &(positions[2] - positions[0]))
}

fn plane_normal(edge1: &TVec3<f32>, edge2: &TVec3<f32>) -> Option<TVec3<f32>>
{
    let normal = cross(edge1, edge2);

    // |e1 x e2| = |e1| |e2| sin(angle)
    if length(&normal) <= length(edge1) * length(edge2) * COLLINEAR_SINE_EPSILON
    {
        return None;
    }

    unit(&normal)
}

fn fallback_basis(edge1: &TVec3<f32>, edge2: &TVec3<f32>) -> TangentBasis
{
    let tangent = unit(edge1).or_else(|| unit(edge2));

    match (tangent, plane_normal(edge1, edge2))
    {
        (Some(tangent), Some(normal)) =>
            {
                let binormal = normalize(&cross(&normal, &tangent));
                TangentBasis { tangent, binormal, degenerate: true }
            },
        _ => TangentBasis { tangent: vec3(1.0, 0.0, 0.0), binormal: vec3(0.0, 1.0, 0.0), degenerate: true }
    }
}

/// The vector scaled to unit length, or `None` if it has no direction or is not finite
fn unit(vector: &TVec3<f32>) -> Option<TVec3<f32>>
{
    let magnitude = length(vector);
    if !(magnitude > 0.0 && magnitude.is_finite())
    {
        return None;
    }

    let unit = *vector / magnitude;
    if unit.iter().all(|x| x.is_finite())
    {
        Some(unit)
    }
    else
    {
        None
    }
}

#[cfg(test)]
mod tests
{
    use nalgebra_glm::{cross, dot, length, normalize, vec2, vec3, TVec3};
    use crate::geometry::tangent_space::{apply_flat_tangents, compute_triangle_basis, geometric_normal};
    use crate::geometry::vertex::Vertex;

    const TOLERANCE: f32 = 1e-4;

    fn assert_unit(vector: &TVec3<f32>)
    {
        assert!((length(vector) - 1.0).abs() < TOLERANCE, "{:?} is not unit length", vector);
    }

    #[test]
    fn axis_aligned_uvs_follow_the_edges()
    {
        let basis = compute_triangle_basis
            (
                [vec3(0.0, 0.0, 0.0), vec3(2.0, 0.0, 0.0), vec3(0.0, 3.0, 0.0)],
                [vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(0.0, 1.0)]
            );

        assert!(!basis.degenerate);
        assert!((basis.tangent - vec3(1.0, 0.0, 0.0)).norm() < TOLERANCE);
        assert!((basis.binormal - vec3(0.0, 1.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn basis_is_unit_and_lies_in_the_triangle_plane()
    {
        let positions = [vec3(0.3, -1.0, 2.0), vec3(1.7, 0.4, 1.1), vec3(-0.6, 1.2, 0.5)];
        let tex_coords = [vec2(0.1, 0.2), vec2(0.9, 0.3), vec2(0.4, 0.8)];

        let basis = compute_triangle_basis(positions, tex_coords);
        let normal = normalize(&cross(&(positions[1] - positions[0]), &(positions[2] - positions[0])));

        assert!(!basis.degenerate);
        assert_unit(&basis.tangent);
        assert_unit(&basis.binormal);
        assert!(dot(&basis.tangent, &normal).abs() < TOLERANCE);
        assert!(dot(&basis.binormal, &normal).abs() < TOLERANCE);
    }

    #[test]
    fn zero_uv_area_uses_fallback()
    {
        let positions = [vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0), vec3(0.0, 0.0, -1.0)];

        // All three vertices share the same texture coordinate
        let basis = compute_triangle_basis(positions, [vec2(0.5, 0.5); 3]);

        assert!(basis.degenerate);
        assert!(basis.tangent.iter().chain(basis.binormal.iter()).all(|x| x.is_finite()));
        assert_unit(&basis.tangent);
        assert_unit(&basis.binormal);
        assert!(dot(&basis.tangent, &basis.binormal).abs() < TOLERANCE);

        let normal = vec3(0.0, 1.0, 0.0);
        assert!(dot(&basis.tangent, &normal).abs() < TOLERANCE);
        assert!(dot(&basis.binormal, &normal).abs() < TOLERANCE);
    }

    #[test]
    fn collapsed_triangle_uses_axes()
    {
        let basis = compute_triangle_basis([vec3(1.0, 1.0, 1.0); 3], [vec2(0.0, 0.0); 3]);

        assert!(basis.degenerate);
        assert_eq!(basis.tangent, vec3(1.0, 0.0, 0.0));
        assert_eq!(basis.binormal, vec3(0.0, 1.0, 0.0));
    }

    #[test]
    fn shared_vertex_keeps_last_triangle_basis()
    {
        let mut vertices = vec!
        [
            Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0]),
            Vertex::new([1.0, 0.0, 0.0], [1.0, 0.0]),
            Vertex::new([0.0, 1.0, 0.0], [0.0, 1.0]),
            // Second triangle in the XZ plane, mapped with U along -Z
            Vertex::new([0.0, 0.0, -1.0], [1.0, 0.0]),
            Vertex::new([1.0, 0.0, 0.0], [0.0, 1.0]),
        ];

        let degenerate = apply_flat_tangents(&mut vertices, &[0, 1, 2, 0, 3, 4]);
        assert_eq!(degenerate, 0);

        // Vertex 2 is only used by the first triangle, vertex 0 is overwritten by the second
        assert_eq!(vertices[2].tangent, [1.0, 0.0, 0.0]);
        assert_eq!(vertices[0].tangent, vertices[3].tangent);
        assert_eq!(vertices[0].binormal, vertices[4].binormal);
        assert_ne!(vertices[0].tangent, vertices[2].tangent);
    }

    #[test]
    fn missing_normals_are_filled_but_authored_ones_are_kept()
    {
        let mut vertices = vec!
        [
            Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0]),
            Vertex::new([1.0, 0.0, 0.0], [1.0, 0.0]),
            Vertex::with_normal([0.0, 1.0, 0.0], [0.0, 0.6, 0.8], [0.0, 1.0]),
        ];

        apply_flat_tangents(&mut vertices, &[0, 1, 2]);

        assert_eq!(vertices[0].normal, [0.0, 0.0, 1.0]);
        assert_eq!(vertices[1].normal, [0.0, 0.0, 1.0]);
        assert_eq!(vertices[2].normal, [0.0, 0.6, 0.8]);
    }

    #[test]
    fn shared_vertex_normal_comes_from_the_same_triangle_as_its_tangent()
    {
        let mut vertices = vec!
        [
            Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0]),
            Vertex::new([1.0, 0.0, 0.0], [1.0, 0.0]),
            Vertex::new([0.0, 1.0, 0.0], [0.0, 1.0]),
            Vertex::new([0.0, 0.0, -1.0], [0.0, 1.0]),
        ];

        // The first triangle lies in the XY plane, the second in the XZ plane; both use vertex 0
        apply_flat_tangents(&mut vertices, &[0, 1, 2, 0, 3, 1]);

        assert_eq!(vertices[2].normal, [0.0, 0.0, 1.0]);
        assert_eq!(vertices[0].normal, [0.0, -1.0, 0.0]);
        assert_eq!(vertices[0].normal, vertices[3].normal);
        assert_eq!(vertices[0].tangent, vertices[3].tangent);

        let normal = TVec3::from(vertices[0].normal);
        assert!(dot(&normal, &TVec3::from(vertices[0].tangent)).abs() < TOLERANCE);
        assert!(dot(&normal, &TVec3::from(vertices[0].binormal)).abs() < TOLERANCE);
    }

    #[test]
    fn small_triangles_still_get_a_normal()
    {
        let positions = [vec3(0.0, 0.0, 0.0), vec3(2e-4, 0.0, 0.0), vec3(0.0, 2e-4, 0.0)];

        let normal = geometric_normal(&positions).expect("a small triangle still has a plane");
        assert!((normal - vec3(0.0, 0.0, 1.0)).norm() < TOLERANCE);

        let mut vertices = vec!
        [
            Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0]),
            Vertex::new([2e-4, 0.0, 0.0], [1.0, 0.0]),
            Vertex::new([0.0, 2e-4, 0.0], [0.0, 1.0]),
        ];

        let degenerate = apply_flat_tangents(&mut vertices, &[0, 1, 2]);

        assert_eq!(degenerate, 0);
        for vertex in &vertices
        {
            assert_unit(&TVec3::from(vertex.normal));
            assert_unit(&TVec3::from(vertex.tangent));
        }
    }

    #[test]
    fn collinear_points_have_no_normal()
    {
        let positions = [vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0), vec3(2.0, 1e-9, 0.0)];
        assert_eq!(geometric_normal(&positions), None);
    }
}
