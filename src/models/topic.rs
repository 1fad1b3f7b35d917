/// 主题枚举
///
/// 题目归属的固定主题集合；关键词命中计分时按 `ALL` 的定义顺序遍历，
/// 同分时先到者优先
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Topic {
    /// 硬件
    Hardware,
    /// 硬件安全
    HardwareSafety,
    /// 网络
    Networking,
    /// 操作系统
    OperatingSystems,
    /// 安全
    Security,
    /// 故障排查
    Troubleshooting,
    /// 移动设备
    MobileDevices,
    /// 打印机
    Printers,
    /// 云计算
    CloudComputing,
    /// 命令行
    CommandLine,
    /// 通用 IT（兜底）
    GeneralIt,
}

impl Topic {
    /// 参与关键词计分的主题（不含兜底项），顺序即同分仲裁顺序
    pub const ALL: [Topic; 10] = [
        Topic::Hardware,
        Topic::HardwareSafety,
        Topic::Networking,
        Topic::OperatingSystems,
        Topic::Security,
        Topic::Troubleshooting,
        Topic::MobileDevices,
        Topic::Printers,
        Topic::CloudComputing,
        Topic::CommandLine,
    ];

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Topic::Hardware => "Hardware",
            Topic::HardwareSafety => "Hardware Safety",
            Topic::Networking => "Networking",
            Topic::OperatingSystems => "Operating Systems",
            Topic::Security => "Security",
            Topic::Troubleshooting => "Troubleshooting",
            Topic::MobileDevices => "Mobile Devices",
            Topic::Printers => "Printers",
            Topic::CloudComputing => "Cloud Computing",
            Topic::CommandLine => "Command Line",
            Topic::GeneralIt => "General IT",
        }
    }

    /// 主题的投票关键词（子串匹配，全小写）
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Topic::Hardware => &[
                "motherboard",
                "cpu",
                "processor",
                "ram",
                "memory",
                "hard drive",
                "ssd",
                "hdd",
                "gpu",
                "graphics",
                "pci",
                "sata",
                "usb",
                "power supply",
                "cooling",
                "fan",
                "heat sink",
                "raid",
            ],
            Topic::HardwareSafety => &[
                "esd",
                "electrostatic",
                "grounded",
                "static",
                "safety",
                "shock",
                "electrical",
            ],
            Topic::Networking => &[
                "network", "router", "switch", "tcp", "ip", "ethernet", "wifi", "wireless",
                "lan", "wan", "man", "pan", "dns", "dhcp", "ping", "tracert", "subnet",
                "cable", "dsl",
            ],
            Topic::OperatingSystems => &[
                "windows",
                "linux",
                "macos",
                "boot",
                "bios",
                "uefi",
                "registry",
                "file system",
                "ntfs",
                "fat32",
                "kernel",
                "driver",
                "service",
                "acpi",
                "power state",
                "bootmgr",
                "winload",
            ],
            Topic::Security => &[
                "password",
                "encryption",
                "firewall",
                "antivirus",
                "malware",
                "authentication",
                "authorization",
                "certificate",
                "vpn",
                "security",
                "attack",
            ],
            Topic::Troubleshooting => &[
                "troubleshoot",
                "problem",
                "issue",
                "error",
                "debug",
                "diagnose",
                "fix",
                "repair",
                "symptom",
                "solution",
                "stages",
            ],
            Topic::MobileDevices => &[
                "mobile",
                "tablet",
                "smartphone",
                "ios",
                "android",
                "cellular",
                "bluetooth",
                "wifi calling",
                "app",
                "touch",
            ],
            Topic::Printers => &[
                "printer", "print", "toner", "ink", "paper", "laser", "inkjet", "scanner",
                "fax",
            ],
            Topic::CloudComputing => &[
                "cloud", "saas", "paas", "iaas", "virtual", "remote", "online", "internet",
            ],
            Topic::CommandLine => &[
                "command", "cmd", "terminal", "shell", "cli", "tracert", "ping", "ipconfig",
                "netstat",
            ],
            Topic::GeneralIt => &[],
        }
    }

    /// 从标准名称解析主题（精确匹配）
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "Hardware" => Some(Topic::Hardware),
            "Hardware Safety" => Some(Topic::HardwareSafety),
            "Networking" => Some(Topic::Networking),
            "Operating Systems" => Some(Topic::OperatingSystems),
            "Security" => Some(Topic::Security),
            "Troubleshooting" => Some(Topic::Troubleshooting),
            "Mobile Devices" => Some(Topic::MobileDevices),
            "Printers" => Some(Topic::Printers),
            "Cloud Computing" => Some(Topic::CloudComputing),
            "Command Line" => Some(Topic::CommandLine),
            "General IT" => Some(Topic::GeneralIt),
            _ => None,
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
