use crate::scene::handles::TextureHandle;
use crate::serialization::gpu_ready_serialization_buffer::GpuReadySerializationBuffer;
use crate::serialization::serializable_for_gpu::{GpuSerializable, GpuSerializationSize};
use palette::Srgb;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Specular {
    pub value: f32,
    pub power: f32,
    pub coefficient: f32,
    pub inner_illumination: f32,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Material {
    color: Srgb,
    specular: Specular,
    reflection: f32,
    refraction: f32,
    transparency: f32,
    texture: Option<TextureHandle>,
}

impl Material {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        assert!(r >= 0.0);
        assert!(g >= 0.0);
        assert!(b >= 0.0);
        self.color = Srgb::new(r, g, b);
        self
    }

    pub fn with_specular(mut self, specular: Specular) -> Self {
        self.specular = specular;
        self
    }

    pub fn with_reflection(mut self, reflection: f32) -> Self {
        self.reflection = reflection;
        self
    }

    pub fn with_refraction(mut self, refraction: f32) -> Self {
        self.refraction = refraction;
        self
    }

    pub fn with_transparency(mut self, transparency: f32) -> Self {
        self.transparency = transparency;
        self
    }

    pub fn with_texture(mut self, texture: Option<TextureHandle>) -> Self {
        self.texture = texture;
        self
    }

    #[must_use]
    pub fn color(&self) -> Srgb {
        self.color
    }

    #[must_use]
    pub fn specular(&self) -> Specular {
        self.specular
    }

    #[must_use]
    pub fn reflection(&self) -> f32 {
        self.reflection
    }

    #[must_use]
    pub fn refraction(&self) -> f32 {
        self.refraction
    }

    #[must_use]
    pub fn transparency(&self) -> f32 {
        self.transparency
    }

    #[must_use]
    pub fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }

    #[must_use]
    pub fn textured(&self) -> bool {
        self.texture.is_some()
    }
}

impl GpuSerializationSize for Material {
    const SERIALIZED_QUARTET_COUNT: usize = 4;
}

impl GpuSerializable for Material {
    fn serialize_into(&self, container: &mut GpuReadySerializationBuffer) {
        debug_assert!(container.has_free_slot(), "buffer overflow");

        container.write_padded_quartet_f32(self.color.red, self.color.green, self.color.blue);
        container.write_quartet_f32(
            self.specular.value,
            self.specular.power,
            self.specular.inner_illumination,
            self.specular.coefficient,
        );
        container.write_padded_quartet_f32(self.reflection, self.refraction, self.transparency);
        container.write_quartet(|writer| {
            writer
                .write_bool(self.textured())
                .write_index(self.texture.map(|handle| handle.0));
        });
    }
}
