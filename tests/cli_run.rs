use assert_cmd::prelude::*;
use std::process::Command;

const PNG_PATH: &str = "imgs/font_rendering_diagram.png";
const SVG_PATH: &str = "imgs/font_rendering_diagram.svg";

#[test]
fn test_fresh_directory_gets_both_images() -> anyhow::Result<()> {
    let workdir = tempfile::tempdir()?;

    let output = Command::cargo_bin("quadglyph")?
        .current_dir(workdir.path())
        .output()?;
    assert!(
        output.status.success(),
        "quadglyph failed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(PNG_PATH), "Missing PNG path in: {stdout}");
    assert!(stdout.contains(SVG_PATH), "Missing SVG path in: {stdout}");
    assert_eq!(stdout.lines().count(), 1);
    assert!(
        !stdout.contains(['\u{2068}', '\u{2069}']),
        "Isolation marks around paths in: {stdout:?}"
    );

    for path in [PNG_PATH, SVG_PATH] {
        let meta = std::fs::metadata(workdir.path().join(path))?;
        assert!(meta.len() > 0, "{path} is empty");
    }

    let png = image::open(workdir.path().join(PNG_PATH))?;
    assert_eq!((png.width(), png.height()), (2400, 1800));

    Ok(())
}

#[test]
fn test_stale_outputs_are_rewritten() -> anyhow::Result<()> {
    let workdir = tempfile::tempdir()?;
    std::fs::create_dir(workdir.path().join("imgs"))?;
    std::fs::write(workdir.path().join(PNG_PATH), b"stale")?;
    std::fs::write(workdir.path().join(SVG_PATH), b"stale")?;

    for _ in 0..2 {
        Command::cargo_bin("quadglyph")?
            .current_dir(workdir.path())
            .assert()
            .success();
    }

    assert_ne!(std::fs::read(workdir.path().join(PNG_PATH))?, b"stale");
    assert_ne!(std::fs::read(workdir.path().join(SVG_PATH))?, b"stale");
    Ok(())
}

#[test]
fn test_blocked_output_directory_fails() -> anyhow::Result<()> {
    let workdir = tempfile::tempdir()?;
    std::fs::write(workdir.path().join("imgs"), b"occupied")?;

    Command::cargo_bin("quadglyph")?
        .current_dir(workdir.path())
        .assert()
        .failure();

    assert!(workdir.path().join("imgs").is_file());
    assert_eq!(std::fs::read_dir(workdir.path())?.count(), 1);
    Ok(())
}

#[test]
fn test_locale_does_not_change_output() -> anyhow::Result<()> {
    let mut svgs = Vec::new();
    for lang in ["zh_CN.UTF-8", "en_US.UTF-8", "C.UTF-8"] {
        let workdir = tempfile::tempdir()?;
        let output = Command::cargo_bin("quadglyph")?
            .current_dir(workdir.path())
            .env("LANG", lang)
            .env("LC_ALL", lang)
            .env("LANGUAGE", lang)
            .output()?;
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.starts_with("渲染示意图已保存到"), "{lang}: {stdout}");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(!stderr.contains("ERROR"), "{lang}: {stderr}");

        let svg = std::fs::read_to_string(workdir.path().join(SVG_PATH))?;
        assert!(svg.contains("基线"), "{lang} figure lost its labels");
        svgs.push(svg);
    }

    assert!(svgs.windows(2).all(|pair| pair[0] == pair[1]));
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_outputs_get_regular_file_mode() -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let workdir = tempfile::tempdir()?;
    Command::cargo_bin("quadglyph")?
        .current_dir(workdir.path())
        .assert()
        .success();

    // Same mode as any file the process creates under the current umask
    let reference = workdir.path().join("reference");
    std::fs::write(&reference, b"")?;
    let expected = std::fs::metadata(&reference)?.permissions().mode() & 0o777;

    for path in [PNG_PATH, SVG_PATH] {
        let mode = std::fs::metadata(workdir.path().join(path))?.permissions().mode() & 0o777;
        assert_eq!(mode, expected, "{path} has mode {mode:o}");
    }
    Ok(())
}
