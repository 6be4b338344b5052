use crate::domain::constants::LIVE_VERSION;
use crate::domain::models::{Manifest, SdistReport};
use crate::errors::EkitError;
use flate2::write::GzEncoder;
use flate2::Compression;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn archive_path(out_dir: &Path, name: &str, version: &str) -> PathBuf {
    out_dir.join(format!("{}-{}.tar.gz", name, version))
}

pub fn digests_path(out_dir: &Path, name: &str, version: &str) -> PathBuf {
    out_dir.join(format!("{}-{}.tar.gz.DIGESTS", name, version))
}

/// Walk in sorted order so identical trees produce identical archives.
fn append_tree<W: Write>(
    builder: &mut tar::Builder<W>,
    repo: &Path,
    src: &Path,
    stem: &str,
) -> anyhow::Result<usize> {
    let rel = src.strip_prefix(repo)?;
    if src.is_file() {
        builder.append_path_with_name(src, Path::new(stem).join(rel))?;
        return Ok(1);
    }
    let mut children: Vec<_> = std::fs::read_dir(src)?.collect::<Result<_, _>>()?;
    children.sort_by_key(|e| e.file_name());
    let mut count = 0usize;
    for child in children {
        count += append_tree(builder, repo, &child.path(), stem)?;
    }
    Ok(count)
}

pub fn build_sdist(
    repo: &Path,
    manifest: &Manifest,
    version: &str,
    out_dir: &Path,
) -> anyhow::Result<SdistReport> {
    if version == LIVE_VERSION {
        return Err(EkitError::LiveVersion.into());
    }
    let name = &manifest.package.name;
    let stem = format!("{}-{}", name, version);

    for rel in &manifest.sdist.include {
        if !repo.join(rel).exists() {
            return Err(EkitError::SdistInputMissing(rel.clone()).into());
        }
    }

    std::fs::create_dir_all(out_dir)?;
    let archive = archive_path(out_dir, name, version);
    let encoder = GzEncoder::new(File::create(&archive)?, Compression::default());
    let mut builder = tar::Builder::new(encoder);

    let mut entries = 0usize;
    for rel in &manifest.sdist.include {
        entries += append_tree(&mut builder, repo, &repo.join(rel), &stem)?;
    }
    builder.into_inner()?.finish()?;

    let mut hasher = Sha256::new();
    hasher.update(std::fs::read(&archive)?);
    let sha256 = hex::encode(hasher.finalize());

    let digests = digests_path(out_dir, name, version);
    std::fs::write(
        &digests,
        format!("SHA256 {}  {}.tar.gz\n", sha256, stem),
    )?;

    Ok(SdistReport {
        name: name.clone(),
        version: version.to_string(),
        archive: archive.display().to_string(),
        digests: digests.display().to_string(),
        sha256,
        entries,
    })
}
