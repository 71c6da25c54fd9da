//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides the file system side of a scenario: clearing the
//! runner's build cache, listing fixture directories, and resolving paths
//! written in the config file.
//!
//! 此模块提供场景的文件系统部分：清除运行器的构建缓存、
//! 列出夹具目录以及解析配置文件中的路径。

use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::error::HarnessError;
use crate::infra::t;

/// Removes a build cache directory so the next invocation starts cold.
///
/// A cache that does not exist is not an error, so calling this before a
/// scenario that has never run is a no-op.
///
/// # Arguments
/// * `cache_path` - Absolute path to the cache directory (e.g. `<project>/elm-stuff`)
///
/// # Returns
/// `true` if something was removed.
///
/// 删除构建缓存目录，以便下一次调用从冷状态开始。
/// 不存在的缓存不算错误。
pub fn clear_build_cache(cache_path: &Path) -> Result<bool, HarnessError> {
    let removal = match fs::symlink_metadata(cache_path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(cache_path),
        Ok(_) => fs::remove_file(cache_path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => Err(e),
    };

    match removal {
        Ok(()) => Ok(true),
        // Raced with something else removing it; the end state is the same.
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(HarnessError::ClearCache {
            path: cache_path.to_path_buf(),
            source,
        }),
    }
}

/// Lists the fixture files of one group, sorted by file name.
///
/// Only regular files (or symlinks to them) are returned; hidden entries
/// such as `.gitkeep` are skipped. A name that is not valid UTF-8 cannot be
/// passed on as an argument, so it is skipped with a warning. The order is byte order of the file
/// name, independent of what the OS directory listing returns.
///
/// 列出一个夹具组的文件，按文件名排序。
/// 只返回常规文件；跳过 `.gitkeep` 等隐藏条目。
pub fn list_fixture_files(dir: &Path) -> Result<Vec<String>, HarnessError> {
    let fixture_err = |source| HarnessError::FixtureDir {
        dir: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(fixture_err)? {
        let entry = entry.map_err(fixture_err)?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            println!(
                "{}",
                t!("plan.non_utf8_fixture", path = entry.path().display()).yellow()
            );
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        if entry.path().is_file() {
            files.push(name);
        }
    }
    files.sort();
    Ok(files)
}

/// Expands `~` and `$VARS` in a configured path and anchors relative
/// results at `base_dir`.
///
/// 展开配置路径中的 `~` 和 `$VARS`，并将相对路径锚定到 `base_dir`。
pub fn resolve_path(base_dir: &Path, raw: &Path) -> Result<PathBuf> {
    let raw_str = raw.to_string_lossy();
    let expanded = shellexpand::full(&raw_str)
        .with_context(|| format!("Failed to expand path: {raw_str}"))?;
    let path = PathBuf::from(expanded.as_ref());
    Ok(if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    })
}

/// Resolves a configured program. Bare names stay untouched so the OS looks
/// them up on `PATH`; anything that looks like a path is expanded and
/// anchored at `base_dir`.
///
/// 解析配置的程序。裸名称保持不变，由操作系统在 `PATH` 上查找；
/// 看起来像路径的内容会被展开并锚定到 `base_dir`。
pub fn resolve_program(base_dir: &Path, program: &str) -> Result<String> {
    let looks_like_path = program.contains('/')
        || program.contains(std::path::MAIN_SEPARATOR)
        || program.starts_with('~')
        || program.starts_with('$');
    if !looks_like_path {
        return Ok(program.to_string());
    }
    let resolved = resolve_path(base_dir, Path::new(program))?;
    Ok(resolved.to_string_lossy().into_owned())
}
