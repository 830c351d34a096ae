use font_mud::generator::{generate_atlas, AtlasRequest};
use font_mud::AtlasOptions;
use std::fs::File;
use std::io::Write;

fn main() {
    let request = AtlasRequest {
        font_file: "NotoSans-Regular.ttf".into(),
        charset: (0x20u8..0x7f).map(char::from).collect(),
        filename: "noto-sans".to_string(),
        options: AtlasOptions::default(),
    };

    let atlas = generate_atlas(notosans::REGULAR_TTF, &request).unwrap();
    for texture in atlas.textures.iter() {
        let mut output = File::create(format!("{}.png", texture.filename)).unwrap();
        output.write_all(&texture.data).unwrap();
    }

    let output = File::create("noto-sans.json").unwrap();
    serde_json::to_writer(output, &atlas.layout).unwrap();
}
