//! End-to-end generation: split features, group them, render runners.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use cucable_features::{
    GeneratedFeature, SplitOptions, collect_feature_files, read_feature, split_feature,
};
use cucable_runner::{FsTemplateReader, RenderOptions, RunnerDescriptor, RunnerRenderer};
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::CucableError;

/// Name prefix of runners that reference several generated features.
pub const MULTI_RUNNER_PREFIX: &str = "CucableMultiRunner";

const FEATURE_EXTENSION: &str = "feature";

/// Names of everything a generation run wrote.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Generated feature names, without extension, in generation order.
    pub feature_files: Vec<String>,
    /// Generated runner names, without extension, in generation order.
    pub runners: Vec<String>,
}

/// Runs a full generation for `settings`.
///
/// Both output directories are created when missing and cleared of files
/// left by previous runs before anything is written.
///
/// # Errors
///
/// Returns [`CucableError::Config`] for invalid settings, source and split
/// errors for unreadable or invalid features, [`CucableError::Render`] when a
/// runner cannot be rendered, and [`CucableError::Output`] when a generated
/// file cannot be written.
pub fn generate(settings: &Settings) -> Result<GenerationReport, CucableError> {
    settings.validate()?;

    let feature_dir = OutputDir::prepare(&settings.generated_feature_directory, FEATURE_EXTENSION)?;
    let runner_dir =
        OutputDir::prepare(&settings.generated_runner_directory, &settings.runner_extension)?;

    let features = split_sources(settings)?;
    for feature in &features {
        feature_dir.write(&feature.file_name(), feature.content())?;
    }
    let feature_files: Vec<String> = features
        .iter()
        .map(|feature| feature.name().to_owned())
        .collect();

    let options = RenderOptions::default()
        .with_strict(settings.strict)
        .with_keep_package_declarations(settings.keep_package_declarations);
    let renderer = RunnerRenderer::with_options(FsTemplateReader::new(), options);

    let mut runners = Vec::new();
    for (runner_name, names) in group_runners(&feature_files, settings.desired_number_of_runners)
    {
        let descriptor = RunnerDescriptor::new(
            settings.source_runner_template_file.as_str(),
            runner_name.as_str(),
            names,
        )?;
        let rendered = renderer.render(&descriptor)?;
        runner_dir.write(
            &format!("{runner_name}.{}", settings.runner_extension),
            &rendered,
        )?;
        runners.push(runner_name);
    }

    info!(
        features = feature_files.len(),
        runners = runners.len(),
        feature_directory = %settings.generated_feature_directory,
        runner_directory = %settings.generated_runner_directory,
        "generation complete"
    );
    Ok(GenerationReport {
        feature_files,
        runners,
    })
}

fn split_sources(settings: &Settings) -> Result<Vec<GeneratedFeature>, CucableError> {
    let options = SplitOptions::default()
        .with_line(settings.source_features.line())
        .with_exclude_tags(settings.exclude_scenario_tags.clone())
        .with_number_of_test_runs(settings.number_of_test_runs);

    let mut generated = Vec::new();
    for path in collect_feature_files(settings.source_features.path())? {
        let stem = path.file_stem().unwrap_or_default();
        let text = read_feature(&path)?;
        let features = split_feature(stem, &text, &options)?;
        debug!(source = %path, generated = features.len(), "split feature");
        generated.extend(features);
    }
    Ok(generated)
}

/// Pairs each runner name with the feature names it references.
///
/// With `desired == 0` every feature gets its own runner named after it.
/// Otherwise features are dealt round-robin over at most `desired` runners;
/// no runner is left without features.
fn group_runners(feature_names: &[String], desired: usize) -> Vec<(String, Vec<String>)> {
    if desired == 0 {
        return feature_names
            .iter()
            .map(|name| (name.clone(), vec![name.clone()]))
            .collect();
    }

    let count = desired.min(feature_names.len());
    let mut groups: Vec<Vec<String>> = vec![Vec::new(); count];
    for (name, slot) in feature_names.iter().zip((0..count).cycle()) {
        if let Some(group) = groups.get_mut(slot) {
            group.push(name.clone());
        }
    }
    groups
        .into_iter()
        .enumerate()
        .map(|(index, names)| (format!("{MULTI_RUNNER_PREFIX}_{:03}", index + 1), names))
        .collect()
}

/// An output directory opened through `cap-std`.
struct OutputDir {
    path: Utf8PathBuf,
    dir: Dir,
}

impl OutputDir {
    /// Creates `path` if needed and removes files with `extension` from it.
    fn prepare(path: &Utf8Path, extension: &str) -> Result<Self, CucableError> {
        let output = |source| CucableError::Output {
            path: path.to_owned(),
            source,
        };
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(output)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(output)?;

        for entry in dir.entries().map_err(output)? {
            let entry = entry.map_err(output)?;
            let name = entry.file_name().map_err(output)?;
            if entry.file_type().map_err(output)?.is_file()
                && Utf8Path::new(&name).extension() == Some(extension)
            {
                dir.remove_file(&name).map_err(output)?;
                debug!(directory = %path, file = %name, "removed stale file");
            }
        }

        Ok(Self {
            path: path.to_owned(),
            dir,
        })
    }

    fn write(&self, file_name: &str, contents: &str) -> Result<(), CucableError> {
        self.dir
            .write(file_name, contents)
            .map_err(|source| CucableError::Output {
                path: self.path.join(file_name),
                source,
            })?;
        debug!(file = %self.path.join(file_name), "wrote file");
        Ok(())
    }
}
