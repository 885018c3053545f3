//! Store Context - Value Objects

/// 层级数据库中的节点路径
///
/// 调用方提供的原始字符串，不校验、不转义、不规范化。
/// 传输层只在拼接 URL 时按段编码。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodePath(String);

impl NodePath {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// 数据库根节点
    pub fn root() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 追加子路径（子路径本身可以包含 `/`）
    pub fn child(&self, key: &str) -> Self {
        if self.0.is_empty() {
            Self(key.to_string())
        } else {
            Self(format!("{}/{}", self.0, key))
        }
    }

    /// 非空路径段
    ///
    /// 空段（前导、尾随或连续的 `/`）在层级数据库中不构成节点，直接跳过
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    pub fn is_root(&self) -> bool {
        self.segments().next().is_none()
    }
}

impl std::fmt::Display for NodePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            write!(f, "/")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<&str> for NodePath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// 所有写入都落在 `mines` 下的三个固定父节点之一
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubTree {
    Profiles,
    MainLogs,
    Attendance,
}

impl SubTree {
    const ROOT: &'static str = "mines";

    /// 父节点下的键名
    pub fn key(&self) -> &'static str {
        match self {
            SubTree::Profiles => "Profiles",
            SubTree::MainLogs => "MainLogs",
            SubTree::Attendance => "attendance",
        }
    }

    /// 父节点完整路径，例如 `mines/Profiles`
    pub fn path(&self) -> NodePath {
        NodePath::new(Self::ROOT).child(self.key())
    }
}

impl std::fmt::Display for SubTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_joins_with_slash() {
        let path = NodePath::new("mines").child("Profiles").child("abc");
        assert_eq!(path.as_str(), "mines/Profiles/abc");
        assert_eq!(NodePath::root().child("mines").as_str(), "mines");
    }

    #[test]
    fn test_segments_skip_empty() {
        let path = NodePath::new("/mines//Profiles/");
        let segments: Vec<_> = path.segments().collect();
        assert_eq!(segments, vec!["mines", "Profiles"]);
        assert!(NodePath::new("//").is_root());
    }

    #[test]
    fn test_path_kept_verbatim() {
        let path = NodePath::new("weird path/with?query#frag");
        assert_eq!(path.as_str(), "weird path/with?query#frag");
    }

    #[test]
    fn test_sub_tree_paths() {
        assert_eq!(SubTree::Profiles.path().as_str(), "mines/Profiles");
        assert_eq!(SubTree::MainLogs.path().as_str(), "mines/MainLogs");
        assert_eq!(SubTree::Attendance.path().as_str(), "mines/attendance");
    }
}
