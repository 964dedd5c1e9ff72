use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// Solid-colored triangle list; every three vertices form one triangle.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshCmd {
    pub vertices: Vec<Vec2>,
    pub color: Color,
}

impl DrawList {
    /// Records `vertices` as triangles. Incomplete trailing triangles are dropped.
    pub fn push_mesh(&mut self, mut vertices: Vec<Vec2>, color: Color) {
        vertices.truncate(vertices.len() / 3 * 3);
        if vertices.is_empty() {
            return;
        }
        self.push(DrawCmd::Mesh(MeshCmd { vertices, color }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_triangles_are_dropped() {
        let mut list = DrawList::new();
        list.push_mesh(vec![Vec2::zero(); 2], Color::WHITE);
        assert!(list.is_empty());

        list.push_mesh(vec![Vec2::zero(); 7], Color::WHITE);
        let DrawCmd::Mesh(m) = &list.items()[0] else {
            panic!("expected a mesh");
        };
        assert_eq!(m.vertices.len(), 6);
    }
}
