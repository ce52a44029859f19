//! The description of a single runner to render.

use crate::errors::DescriptorError;

/// Everything the renderer needs to produce one runner file.
///
/// Descriptors are immutable once built. The feature list keeps its input
/// order: the first entry feeds single-feature templates and the whole list
/// feeds multi-feature references.
///
/// # Examples
///
/// ```
/// use cucable_runner::RunnerDescriptor;
///
/// let descriptor = RunnerDescriptor::new(
///     "src/test/resources/runner.txt",
///     "Login_scenario001_run001_IT",
///     vec!["Login_scenario001_run001_IT".to_owned()],
/// )?;
/// assert_eq!(descriptor.target_name(), "Login_scenario001_run001_IT");
/// assert_eq!(descriptor.feature_file_names().len(), 1);
/// # Ok::<(), cucable_runner::DescriptorError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunnerDescriptor {
    template_source: String,
    target_name: String,
    feature_file_names: Vec<String>,
}

impl RunnerDescriptor {
    /// Builds a descriptor, rejecting blank runner names and empty feature
    /// lists.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::BlankTargetName`] when `target_name` is
    /// blank and [`DescriptorError::NoFeatureFiles`] when no feature file
    /// names are given.
    pub fn new(
        template_source: impl Into<String>,
        target_name: impl Into<String>,
        feature_file_names: Vec<String>,
    ) -> Result<Self, DescriptorError> {
        let target_name = target_name.into();
        if target_name.trim().is_empty() {
            return Err(DescriptorError::BlankTargetName);
        }
        if feature_file_names.is_empty() {
            return Err(DescriptorError::NoFeatureFiles { target_name });
        }
        Ok(Self {
            template_source: template_source.into(),
            target_name,
            feature_file_names,
        })
    }

    /// Returns the template path exactly as supplied.
    #[must_use]
    pub fn template_source(&self) -> &str {
        &self.template_source
    }

    /// Returns the runner name.
    #[must_use]
    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// Returns the referenced feature file names in input order.
    #[must_use]
    pub fn feature_file_names(&self) -> &[String] {
        &self.feature_file_names
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn rejects_blank_runner_names(#[case] name: &str) {
        let result = RunnerDescriptor::new("runner.txt", name, vec!["a".to_owned()]);
        assert_eq!(result, Err(DescriptorError::BlankTargetName));
    }

    #[test]
    fn rejects_empty_feature_lists() {
        let result = RunnerDescriptor::new("runner.txt", "Runner", Vec::new());
        assert_eq!(
            result,
            Err(DescriptorError::NoFeatureFiles {
                target_name: "Runner".to_owned()
            })
        );
    }

    #[test]
    fn keeps_feature_order_and_duplicates() {
        let names = vec!["b".to_owned(), "a".to_owned(), "b".to_owned()];
        let Ok(descriptor) = RunnerDescriptor::new("t", "Runner", names.clone()) else {
            panic!("descriptor should be valid");
        };
        assert_eq!(descriptor.feature_file_names(), names.as_slice());
        assert_eq!(descriptor.template_source(), "t");
    }
}
