use super::*;

fn cfg(width: u32, height: u32, fps: u32) -> EncodeConfig {
    EncodeConfig {
        width,
        height,
        fps,
        out_path: PathBuf::from("target/out.mp4"),
        overwrite: true,
    }
}

#[test]
fn config_validation_catches_bad_values() {
    assert!(cfg(0, 10, 30).validate().is_err());
    assert!(cfg(11, 10, 30).validate().is_err());
    assert!(cfg(10, 10, 0).validate().is_err());
    assert!(cfg(10, 10, 30).validate().is_ok());
}

#[test]
fn flatten_premul_over_black() {
    // premultiplied red @ 50% alpha
    let src = vec![128u8, 0, 0, 128];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, true, [0, 0, 0, 255]).unwrap();
    assert_eq!(dst, vec![128u8, 0, 0, 255]);
}

#[test]
fn flatten_straight_over_white() {
    let src = vec![255u8, 0, 0, 0];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, false, [255, 255, 255, 255]).unwrap();
    assert_eq!(dst, vec![255u8, 255, 255, 255]);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_to_opaque_rgba8(&mut dst, &[0u8; 4], true, [0, 0, 0, 255]).is_err());
}

#[test]
fn args_describe_raw_rgba_input_and_h264_output() {
    let args = ffmpeg_args(&cfg(64, 48, 30));
    assert_eq!(args[0], "-y");
    let at = |flag: &str| {
        let i = args.iter().position(|a| a == flag).unwrap();
        args[i + 1].as_str()
    };
    assert_eq!(at("-s"), "64x48");
    assert_eq!(at("-r"), "30");
    assert_eq!(at("-i"), "pipe:0");
    assert_eq!(at("-c:v"), "libx264");
    assert_eq!(args.last().map(String::as_str), Some("+faststart"));

    let keep = EncodeConfig {
        overwrite: false,
        ..cfg(64, 48, 30)
    };
    assert_eq!(ffmpeg_args(&keep)[0], "-n");
}
