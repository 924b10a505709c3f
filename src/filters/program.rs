/// Fixed fragment program of one filter kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShaderProgram {
    /// Stable program identifier.
    pub name: &'static str,
    /// GLSL ES fragment source.
    pub fragment_src: &'static str,
}

pub const WAVE_DISPLACEMENT: ShaderProgram = ShaderProgram {
    name: "wave_displacement",
    fragment_src: r#"precision mediump float;
varying vec2 vTextureCoord;
varying vec4 vColor;

uniform sampler2D uSampler;
uniform float shift;
uniform float periodicity;
uniform vec4 dimensions;
uniform vec4 strength;

void main(void) {
    vec2 coord = vTextureCoord * dimensions.xy;
    float phase = dot(coord, strength.xy) / periodicity;
    vec2 offset = sin(phase + shift) * strength.zw;
    gl_FragColor = texture2D(uSampler, (coord + offset) / dimensions.xy);
}
"#,
};

pub const PALETTE_REMAP: ShaderProgram = ShaderProgram {
    name: "palette_remap",
    fragment_src: r#"precision mediump float;
varying vec2 vTextureCoord;
varying vec4 vColor;

uniform sampler2D uSampler;
uniform vec4 colorA;
uniform vec4 colorB;
uniform vec4 colorC;
uniform vec4 colorD;
uniform float tolerance;
uniform float shift;

void main(void) {
    vec4 src = texture2D(uSampler, vTextureCoord);
    vec4 v = src - colorA;
    vec4 d = colorB - colorA;
    float dd = dot(d, d);
    if (dd < 1e-12) {
        gl_FragColor = src;
        return;
    }
    vec4 proj = (dot(v, d) / dd) * d;
    float dist = distance(v, proj);
    float t = length(proj) / sqrt(dd);
    vec4 remapped = colorC + (colorD - colorC) * mod(t + shift, 1.0);
    gl_FragColor = dist < tolerance ? remapped : src;
}
"#,
};
