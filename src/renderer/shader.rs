//! Shader programs: combined-source parsing, compile/link, and uniform
//! upload through a binding token.
//!
//! Shader files keep both stages in one file, split by `#shader` markers:
//!
//! ```text
//! #shader vertex
//! #version 330 core
//! ...
//! #shader fragment
//! #version 330 core
//! ...
//! ```
//!
//! Parsing is pure CPU work and separated from program creation, so source
//! handling is testable without a GL context.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use glam::{Mat4, Vec3, Vec4};
use glow::HasContext;

use crate::error::{RenderError, RenderResult};
use crate::renderer::debug::{gl_check, gl_cleanup};

/// The two pipeline stages a program is linked from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Vertex and fragment GLSL split out of one combined source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    name: String,
    vertex: String,
    fragment: String,
}

impl ShaderSource {
    /// Splits combined `text` on its `#shader <stage>` markers.
    ///
    /// Lines before the first marker must be blank; an unknown stage name
    /// or a missing/empty stage section is an error. A repeated marker
    /// appends to the section it names.
    pub fn parse(name: impl Into<String>, text: &str) -> RenderResult<Self> {
        let mut vertex = String::new();
        let mut fragment = String::new();
        let mut current: Option<ShaderStage> = None;

        for line in text.lines() {
            let trimmed = line.trim();
            if let Some(rest) = trimmed.strip_prefix("#shader") {
                // "#shaderfoo" is not a marker, only "#shader foo" is
                if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                    current = Some(match rest.trim() {
                        "vertex" => ShaderStage::Vertex,
                        "fragment" => ShaderStage::Fragment,
                        other => return Err(RenderError::UnknownShaderStage(other.to_string())),
                    });
                    continue;
                }
            }
            match current {
                Some(ShaderStage::Vertex) => {
                    vertex.push_str(line);
                    vertex.push('\n');
                }
                Some(ShaderStage::Fragment) => {
                    fragment.push_str(line);
                    fragment.push('\n');
                }
                None => {
                    if !trimmed.is_empty() {
                        return Err(RenderError::UnmarkedShaderSource);
                    }
                }
            }
        }

        if vertex.trim().is_empty() {
            return Err(RenderError::MissingShaderStage(ShaderStage::Vertex));
        }
        if fragment.trim().is_empty() {
            return Err(RenderError::MissingShaderStage(ShaderStage::Fragment));
        }

        Ok(Self {
            name: name.into(),
            vertex,
            fragment,
        })
    }

    /// Reads and parses a combined shader file. The file stem becomes the
    /// program name used in logs and link errors.
    pub fn from_file(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("shader");
        Self::parse(name, &text)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex(&self) -> &str {
        &self.vertex
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }
}

/// Name to resolved-location map. Misses are cached too, so a uniform the
/// linker optimized away costs one driver query total, not one per frame.
#[derive(Debug)]
struct UniformCache<L> {
    locations: HashMap<String, Option<L>>,
}

impl<L> Default for UniformCache<L> {
    fn default() -> Self {
        Self {
            locations: HashMap::new(),
        }
    }
}

impl<L: Clone> UniformCache<L> {
    /// Returns the cached location for `name`, calling `lookup` only on
    /// the first resolve. The second tuple field reports whether this call
    /// performed that first lookup.
    fn resolve(&mut self, name: &str, lookup: impl FnOnce() -> Option<L>) -> (Option<L>, bool) {
        if let Some(cached) = self.locations.get(name) {
            return (cached.clone(), false);
        }
        let location = lookup();
        self.locations.insert(name.to_string(), location.clone());
        (location, true)
    }
}

/// A linked GL program owning its uniform-location cache.
///
/// Uniform uploads go through the [`BoundShader`] token returned by
/// [`bind`](Self::bind), which makes "program must be in use when its
/// uniforms are set" hold by construction.
pub struct Shader {
    gl: Rc<glow::Context>,
    program: glow::Program,
    name: String,
    uniforms: RefCell<UniformCache<glow::UniformLocation>>,
}

fn compile_stage(gl: &glow::Context, stage: ShaderStage, source: &str) -> RenderResult<glow::Shader> {
    let shader = gl_check!(gl, gl.create_shader(stage.gl_type())).map_err(RenderError::ObjectCreation)?;
    gl_check!(gl, gl.shader_source(shader, source));
    gl_check!(gl, gl.compile_shader(shader));
    if !gl_check!(gl, gl.get_shader_compile_status(shader)) {
        let log = gl_check!(gl, gl.get_shader_info_log(shader));
        gl_check!(gl, gl.delete_shader(shader));
        return Err(RenderError::ShaderCompile { stage, log });
    }
    Ok(shader)
}

impl Shader {
    /// Compiles both stages and links them. Stage objects are deleted once
    /// the program exists; on any failure everything created so far is
    /// released before the error propagates.
    pub fn new(gl: &Rc<glow::Context>, source: &ShaderSource) -> RenderResult<Self> {
        let vertex = compile_stage(gl, ShaderStage::Vertex, source.vertex())?;
        let fragment = match compile_stage(gl, ShaderStage::Fragment, source.fragment()) {
            Ok(fragment) => fragment,
            Err(err) => {
                gl_check!(gl, gl.delete_shader(vertex));
                return Err(err);
            }
        };

        let program = match gl_check!(gl, gl.create_program()) {
            Ok(program) => program,
            Err(err) => {
                gl_check!(gl, gl.delete_shader(vertex));
                gl_check!(gl, gl.delete_shader(fragment));
                return Err(RenderError::ObjectCreation(err));
            }
        };
        gl_check!(gl, gl.attach_shader(program, vertex));
        gl_check!(gl, gl.attach_shader(program, fragment));
        gl_check!(gl, gl.link_program(program));

        let linked = gl_check!(gl, gl.get_program_link_status(program));
        let log = if linked {
            String::new()
        } else {
            gl_check!(gl, gl.get_program_info_log(program))
        };
        gl_check!(gl, gl.delete_shader(vertex));
        gl_check!(gl, gl.delete_shader(fragment));
        if !linked {
            gl_check!(gl, gl.delete_program(program));
            return Err(RenderError::ProgramLink {
                name: source.name().to_string(),
                log,
            });
        }

        log::debug!("linked shader program '{}'", source.name());
        Ok(Self {
            gl: Rc::clone(gl),
            program,
            name: source.name().to_string(),
            uniforms: RefCell::new(UniformCache::default()),
        })
    }

    /// Reads, parses, compiles and links a combined shader file.
    pub fn from_file(gl: &Rc<glow::Context>, path: impl AsRef<Path>) -> RenderResult<Self> {
        let source = ShaderSource::from_file(path)?;
        Self::new(gl, &source)
    }

    /// Makes this program current and returns the token uniform setters
    /// live on. The token does not restore the previous program when it
    /// goes away; it only orders uploads after binding.
    pub fn bind(&self) -> BoundShader<'_> {
        gl_check!(&self.gl, self.gl.use_program(Some(self.program)));
        BoundShader { shader: self }
    }

    pub fn unbind(&self) {
        gl_check!(&self.gl, self.gl.use_program(None));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn location(&self, name: &str) -> Option<glow::UniformLocation> {
        let (location, first_lookup) = self.uniforms.borrow_mut().resolve(name, || {
            gl_check!(&self.gl, self.gl.get_uniform_location(self.program, name))
        });
        if first_lookup && location.is_none() {
            log::warn!("shader '{}' has no uniform named '{name}'", self.name);
        }
        location
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        gl_cleanup!(&self.gl, self.gl.delete_program(self.program));
    }
}

/// Proof that a [`Shader`] is the currently selected program.
///
/// Setters silently skip uniforms the program does not have (after one
/// logged warning), so callers can share one upload path across shaders
/// with different uniform sets.
pub struct BoundShader<'a> {
    shader: &'a Shader,
}

impl BoundShader<'_> {
    pub fn set_i32(&self, name: &str, value: i32) {
        if let Some(location) = self.shader.location(name) {
            gl_check!(
                &self.shader.gl,
                self.shader.gl.uniform_1_i32(Some(&location), value)
            );
        }
    }

    pub fn set_f32(&self, name: &str, value: f32) {
        if let Some(location) = self.shader.location(name) {
            gl_check!(
                &self.shader.gl,
                self.shader.gl.uniform_1_f32(Some(&location), value)
            );
        }
    }

    /// Booleans upload as the 0/1 integers GLSL `bool` uniforms expect.
    pub fn set_bool(&self, name: &str, value: bool) {
        self.set_i32(name, i32::from(value));
    }

    pub fn set_vec3(&self, name: &str, value: Vec3) {
        if let Some(location) = self.shader.location(name) {
            gl_check!(
                &self.shader.gl,
                self.shader
                    .gl
                    .uniform_3_f32(Some(&location), value.x, value.y, value.z)
            );
        }
    }

    pub fn set_vec4(&self, name: &str, value: Vec4) {
        if let Some(location) = self.shader.location(name) {
            gl_check!(
                &self.shader.gl,
                self.shader
                    .gl
                    .uniform_4_f32(Some(&location), value.x, value.y, value.z, value.w)
            );
        }
    }

    /// Matrices upload column-major as `glam` stores them, so `transpose`
    /// stays off.
    pub fn set_mat4(&self, name: &str, value: &Mat4) {
        if let Some(location) = self.shader.location(name) {
            gl_check!(
                &self.shader.gl,
                self.shader.gl.uniform_matrix_4_f32_slice(
                    Some(&location),
                    false,
                    &value.to_cols_array(),
                )
            );
        }
    }
}
