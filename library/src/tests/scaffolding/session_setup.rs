#[cfg(test)]
pub(crate) mod tests {
    use crate::config::ServiceConfig;
    use crate::geometry::alias::Point;
    use crate::output::color_depth::ColorDepth;
    use crate::scene::capacities::{SceneCapacities, TextureFormat};
    use crate::scene::container::Scene;
    use crate::scene::handles::BoxId;
    use crate::scene::light::{LightKind, LightParameters};
    use crate::scene::material::Material;
    use crate::scene::primitive::{PrimitiveGeometry, PrimitiveKind};

    pub(crate) const FRAME_WIDTH: u32 = 4;
    pub(crate) const FRAME_HEIGHT: u32 = 2;

    #[must_use]
    pub(crate) fn make_test_config() -> ServiceConfig {
        let mut config = ServiceConfig {
            capacities: SceneCapacities { max_primitives: 64, max_boxes: 8, max_lights: 2, max_materials: 4, max_textures: 2 },
            texture_format: TextureFormat { width: 2, height: 2, depth: 3 },
            frame_width: FRAME_WIDTH,
            frame_height: FRAME_HEIGHT,
            color_depth: ColorDepth::Rgba,
            kernel_deadline_ms: 1_000,
            initial_draft: 3,
            ..ServiceConfig::default()
        };
        config.scene_parameters = config.scene_parameters.with_frame_size(FRAME_WIDTH, FRAME_HEIGHT);
        config.scene_parameters.max_path_tracing_iterations = 4;
        config
    }

    /// Two spheres in box 2, a plane in box 0, one material and one light.
    pub(crate) fn populate(scene: &mut Scene) {
        let material = scene.add_material().unwrap();
        assert!(scene.set_material(material, &Material::new().with_color(1.0, 0.5, 0.0)));

        for x in [-10.0, 10.0] {
            let sphere = scene.add_primitive(PrimitiveKind::Sphere).unwrap();
            assert!(scene.set_primitive(sphere, Some(BoxId(2)), &PrimitiveGeometry::sphere(Point::new(x, 0.0, 0.0), 5.0), Some(material)));
        }
        let floor = scene.add_primitive(PrimitiveKind::XzPlane).unwrap();
        assert!(scene.set_primitive(floor, Some(BoxId(0)), &PrimitiveGeometry::new(Point::new(0.0, -20.0, 0.0), 100.0, 100.0), None));

        let light = scene.add_light(LightKind::Sphere).unwrap();
        assert!(scene.set_light(light, &LightParameters { center: Point::new(0.0, 100.0, 0.0), radius: 5.0, ..LightParameters::default() }));
    }
}
