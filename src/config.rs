#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum Config {
    /// 求值开始和结束时向标准错误打印流水线信息
    Verbose,
    /// 文本去重、排序全局忽略大小写
    NoCase,
}

#[inline]
pub(crate) fn is_nocase(nocase: bool, configs: &[Config]) -> bool {
    nocase || configs.contains(&Config::NoCase)
}

#[inline]
pub(crate) fn is_verbose(configs: &[Config]) -> bool {
    configs.contains(&Config::Verbose)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_nocase() {
        assert!(is_nocase(true, &[]));
        assert!(is_nocase(false, &[Config::NoCase]));
        assert!(!is_nocase(false, &[Config::Verbose]));
    }
}
