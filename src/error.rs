use thiserror::Error;

use crate::renderer::ShaderStage;

pub type RenderResult<T> = Result<T, RenderError>;

/// Everything that can go wrong while building or feeding GPU resources.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to allocate GPU object: {0}")]
    ObjectCreation(String),

    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("shader program '{name}' failed to link: {log}")]
    ProgramLink { name: String, log: String },

    #[error("unknown shader stage marker '{0}'")]
    UnknownShaderStage(String),

    #[error("shader source appears before the first #shader marker")]
    UnmarkedShaderSource,

    #[error("missing or empty #shader {0} section")]
    MissingShaderStage(ShaderStage),

    #[error("vertex data length {data_len} is not a multiple of layout stride {stride}")]
    LayoutMismatch { data_len: usize, stride: u32 },

    #[error("pixel buffer of {data_len} bytes does not match a {width}x{height} RGBA image")]
    ImageSize {
        width: u32,
        height: u32,
        data_len: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_stage() {
        let err = RenderError::ShaderCompile {
            stage: ShaderStage::Fragment,
            log: "0:12: 'foo' : undeclared identifier".into(),
        };
        let text = err.to_string();
        assert!(text.contains("fragment"));
        assert!(text.contains("undeclared identifier"));
    }

    #[test]
    fn layout_mismatch_reports_both_numbers() {
        let err = RenderError::LayoutMismatch {
            data_len: 65,
            stride: 16,
        };
        let text = err.to_string();
        assert!(text.contains("65"));
        assert!(text.contains("16"));
    }

    #[test]
    fn io_errors_convert() {
        fn read() -> RenderResult<String> {
            Ok(std::fs::read_to_string("/definitely/not/here.shader")?)
        }
        assert!(matches!(read(), Err(RenderError::Io(_))));
    }
}
