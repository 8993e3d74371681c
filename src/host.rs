//! Host platform in dukkha's naming (kernel/arch as Go spells them).

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    pub kernel: String,
    pub arch: String,
}

impl Host {
    /// Platform this binary was built for, with optional overrides.
    pub fn detect(kernel: Option<String>, arch: Option<String>) -> Self {
        Self {
            kernel: kernel.unwrap_or_else(|| kernel_name(std::env::consts::OS).to_string()),
            arch: arch.unwrap_or_else(|| arch_name(std::env::consts::ARCH).to_string()),
        }
    }
}

fn kernel_name(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

fn arch_name(arch: &str) -> &str {
    match arch {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "powerpc64" => "ppc64",
        "powerpc" => "ppc",
        "loongarch64" => "loong64",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn maps_rust_names() {
        assert_eq!(kernel_name("macos"), "darwin");
        assert_eq!(kernel_name("linux"), "linux");
        assert_eq!(kernel_name("windows"), "windows");
        assert_eq!(arch_name("x86_64"), "amd64");
        assert_eq!(arch_name("aarch64"), "arm64");
        assert_eq!(arch_name("riscv64"), "riscv64");
        assert_eq!(arch_name("s390x"), "s390x");
    }

    #[test]
    fn overrides_win() {
        let host = Host::detect(Some("plan9".into()), Some("mips".into()));
        assert_eq!(
            host,
            Host {
                kernel: "plan9".into(),
                arch: "mips".into()
            }
        );
    }

    #[test]
    fn detected_host_is_not_empty() {
        let host = Host::detect(None, None);
        assert!(!host.kernel.is_empty());
        assert!(!host.arch.is_empty());
    }
}
