//! Bind-group slots and uniform-name resolution for the bundled WGSL.
//!
//! wgpu has no uniform location lookup, so the renderer checks at pipeline
//! creation that every field it writes is declared in the shader's uniform
//! struct. An unresolved name is reported and rendering continues; the GPU
//! then reads whatever happens to sit at that offset.

pub const FRAME_GROUP: u32 = 0;
pub const OBJECT_GROUP: u32 = 1;
pub const SHADOW_GROUP: u32 = 2;

pub const SHADOW_MAP_BINDING: u32 = 0;
pub const SHADOW_SAMPLER_BINDING: u32 = 1;

/// Field names declared in `struct <name> { ... }`, or `None` when the
/// struct is absent.
pub fn struct_fields<'s>(wgsl: &'s str, struct_name: &str) -> Option<Vec<&'s str>> {
    let body = struct_body(wgsl, struct_name)?;
    let fields = body
        .lines()
        .map(|line| line.split("//").next().unwrap_or(""))
        .flat_map(|code| code.split(','))
        .filter_map(|decl| {
            let (name, _ty) = strip_attributes(decl.trim()).split_once(':')?;
            let name = name.trim();
            (!name.is_empty()).then_some(name)
        })
        .collect();
    Some(fields)
}

/// Names from `required` that the struct does not declare. A missing struct
/// leaves every name unresolved.
pub fn unresolved_fields<'a>(wgsl: &str, struct_name: &str, required: &[&'a str]) -> Vec<&'a str> {
    let declared = struct_fields(wgsl, struct_name).unwrap_or_default();
    required
        .iter()
        .copied()
        .filter(|name| !declared.contains(name))
        .collect()
}

fn struct_body<'s>(wgsl: &'s str, struct_name: &str) -> Option<&'s str> {
    let mut rest = wgsl;
    while let Some(at) = rest.find("struct") {
        let after = rest[at + "struct".len()..].trim_start();
        if let Some(tail) = after.strip_prefix(struct_name) {
            let tail = tail.trim_start();
            if let Some(inner) = tail.strip_prefix('{') {
                let end = inner.find('}')?;
                return Some(&inner[..end]);
            }
        }
        rest = &rest[at + "struct".len()..];
    }
    None
}

fn strip_attributes(decl: &str) -> &str {
    let mut decl = decl;
    while let Some(rest) = decl.strip_prefix('@') {
        // @align(16) name: ty  |  @size(8) name: ty
        match rest.find(')') {
            Some(close) => decl = rest[close + 1..].trim_start(),
            None => break,
        }
    }
    decl
}

#[cfg(test)]
mod tests {
    use super::*;

    const SRC: &str = "
        struct Frame {
            view: mat4x4<f32>, // camera
            @align(16) fog: vec4<f32>,
        };
        struct FrameExtra { other: f32 };
    ";

    #[test]
    fn reads_declared_fields() {
        assert_eq!(struct_fields(SRC, "Frame"), Some(vec!["view", "fog"]));
        assert_eq!(struct_fields(SRC, "FrameExtra"), Some(vec!["other"]));
        assert_eq!(struct_fields(SRC, "Missing"), None);
    }

    #[test]
    fn reports_missing_names() {
        assert_eq!(unresolved_fields(SRC, "Frame", &["view", "fog", "bias"]), vec!["bias"]);
        assert_eq!(unresolved_fields(SRC, "Nope", &["view"]), vec!["view"]);
    }
}
