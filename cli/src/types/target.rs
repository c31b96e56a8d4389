use clap::ValueEnum;
use stagehand::BuildTarget;

#[derive(Debug, PartialEq, Eq, Clone, Copy, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum TargetArg {
  #[value(alias = "dev")]
  Development,
  #[value(alias = "prod")]
  Production,
}

impl From<TargetArg> for BuildTarget {
  fn from(value: TargetArg) -> Self {
    match value {
      TargetArg::Development => BuildTarget::Development,
      TargetArg::Production => BuildTarget::Production,
    }
  }
}
