use log::{info, warn};
use rand::Rng;
use tracer_host::geometry::alias::Point;
use tracer_host::scene::container::Scene;
use tracer_host::scene::handles::{BoxId, MaterialHandle, TextureHandle};
use tracer_host::scene::light::{LightKind, LightParameters};
use tracer_host::scene::material::{Material, Specular};
use tracer_host::scene::primitive::{PrimitiveGeometry, PrimitiveKind};
use tracer_host::scene::texture::PixelLayout;

const PLAIN_MATERIALS: usize = 20;
const TEXTURES: usize = 8;
const SPHERES: usize = 5;
const CHECKER_CELL: usize = 32;

pub(crate) const SPHERES_BOX: BoxId = BoxId(0);
pub(crate) const FLOOR_BOX: BoxId = BoxId(1);
pub(crate) const MOLECULE_FIRST_BOX: BoxId = BoxId(2);

/// Checkerboard in BGR order, two tones derived from the texture number.
#[must_use]
fn make_checker_texture(scene: &Scene, seed: usize) -> Vec<u8> {
    let format = scene.texture_format();
    let light = [(40 * seed % 256) as u8, 200, 255];
    let dark = [30, (25 * seed % 256) as u8, 60];

    let mut pixels = Vec::with_capacity(format.pixels_count() * PixelLayout::Bgr.bytes_per_pixel());
    for y in 0..format.height {
        for x in 0..format.width {
            let tone = if (x / CHECKER_CELL + y / CHECKER_CELL) % 2 == 0 { light } else { dark };
            pixels.extend_from_slice(&tone);
        }
    }
    pixels
}

fn add_textures(scene: &mut Scene) -> Vec<TextureHandle> {
    let mut textures = Vec::new();
    for index in 0..TEXTURES {
        let pixels = make_checker_texture(scene, index + 1);
        match scene.load_texture(&pixels, PixelLayout::Bgr) {
            Ok(handle) => textures.push(handle),
            Err(error) => {
                warn!("texture {} skipped: {}", index, error);
                break;
            }
        }
    }
    textures
}

/// The first materials are a mirror, two glasses and a plain white one;
/// the rest are random colors, and one textured material per texture follows.
#[must_use]
fn make_material<R: Rng>(index: usize, texture: Option<TextureHandle>, random: &mut R) -> Material {
    let specular = Specular { value: 0.8, power: 100.0, coefficient: 1.0, inner_illumination: 0.0 };
    let base = Material::new().with_specular(specular);
    match index {
        0 => base.with_color(1.0, 1.0, 1.0).with_reflection(0.9),
        1 => base.with_color(1.0, 1.0, 1.0).with_reflection(0.1).with_refraction(0.9).with_transparency(0.9),
        2 => base.with_color(1.0, 1.0, 1.0).with_reflection(1.0).with_refraction(0.5).with_transparency(0.9),
        3 => base.with_color(1.0, 1.0, 1.0),
        _ => {
            let color = base.with_color(random.gen_range(0.0..1.0), random.gen_range(0.0..1.0), random.gen_range(0.0..1.0));
            match texture {
                Some(_) => color.with_texture(texture),
                None => color.with_reflection(0.1),
            }
        }
    }
}

fn add_materials<R: Rng>(scene: &mut Scene, textures: &[TextureHandle], random: &mut R) -> Vec<MaterialHandle> {
    let mut materials = Vec::new();
    for index in 0..PLAIN_MATERIALS + textures.len() {
        let texture = index.checked_sub(PLAIN_MATERIALS).and_then(|texture_index| textures.get(texture_index).copied());
        let Ok(handle) = scene.add_material() else {
            break;
        };
        scene.set_material(handle, &make_material(index, texture, random));
        materials.push(handle);
    }
    materials
}

/// A few random spheres above a textured checkerboard, lit by one spherical lamp.
pub(crate) fn build<R: Rng>(scene: &mut Scene, random: &mut R) -> anyhow::Result<()> {
    let textures = add_textures(scene);
    let materials = add_materials(scene, &textures, random);
    anyhow::ensure!(materials.len() > PLAIN_MATERIALS, "the scene needs room for at least {} materials", PLAIN_MATERIALS + 1);

    for _ in 0..SPHERES {
        let center = Point::new(random.gen_range(-400.0..400.0), random.gen_range(-100.0..100.0), random.gen_range(-400.0..400.0));
        let radius = random.gen_range(20.0..70.0);
        let material = materials[random.gen_range(0..PLAIN_MATERIALS)];

        let sphere = scene.add_primitive(PrimitiveKind::Sphere)?;
        scene.set_primitive(sphere, Some(SPHERES_BOX), &PrimitiveGeometry::sphere(center, radius), Some(material));
    }

    let floor_material = materials[PLAIN_MATERIALS + random.gen_range(0..textures.len().max(1))];
    let floor = scene.add_primitive(PrimitiveKind::Checkerboard)?;
    let floor_geometry = PrimitiveGeometry::new(Point::new(0.0, -100.0, 0.0), 1000.0, 1000.0).with_padding(2.0, 2.0);
    scene.set_primitive(floor, Some(FLOOR_BOX), &floor_geometry, Some(floor_material));

    let lamp = scene.add_light(LightKind::Sphere)?;
    scene.set_light(lamp, &LightParameters { center: Point::new(-500.0, 1000.0, -500.0), radius: 10.0, ..LightParameters::default() });

    info!("demo scene: {} primitives, {} materials, {} textures", scene.primitives_count(), scene.materials_count(), scene.textures_count());
    Ok(())
}
