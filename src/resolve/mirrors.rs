use once_cell::sync::Lazy;

use crate::tuple::{Mirror, Source};

/// Import path prefixes with a fixed, known mirror.
///
/// Matched in order against the whole path or a `/`-bounded prefix of
/// it; longer prefixes sharing a stem must come first.
pub(super) static MIRRORS: Lazy<Vec<(&'static str, Mirror)>> = Lazy::new(|| {
    let gh = Mirror::github;
    vec![
        ("github.com/docker/docker", gh("moby", "moby")),
        (
            "contrib.go.opencensus.io/exporter/ocagent",
            gh("census-ecosystem", "opencensus-go-exporter-ocagent"),
        ),
        (
            "aletheia.icu/broccoli/fs",
            gh("aletheia-icu", "broccoli").with_submodule("fs"),
        ),
        ("camlistore.org", gh("perkeep", "perkeep")),
        ("docker.io/go-docker", gh("docker", "go-docker")),
        ("git.apache.org/thrift.git", gh("apache", "thrift")),
        ("go.bug.st/serial.v1", gh("bugst", "go-serial")),
        ("go.elastic.co/fastjson", gh("elastic", "go-fastjson")),
        ("go.mongodb.org/mongo-driver", gh("mongodb", "mongo-go-driver")),
        ("go.opencensus.io", gh("census-instrumentation", "opencensus-go")),
        ("go4.org", gh("go4org", "go4")),
        ("gocloud.dev", gh("google", "go-cloud")),
        ("golang.zx2c4.com/wireguard", gh("wireguard", "wireguard-go")),
        ("google.golang.org/api", gh("googleapis", "google-api-go-client")),
        ("google.golang.org/appengine", gh("golang", "appengine")),
        ("google.golang.org/genproto", gh("google", "go-genproto")),
        ("google.golang.org/grpc", gh("grpc", "grpc-go")),
        ("google.golang.org/protobuf", gh("protocolbuffers", "protobuf-go")),
        ("gotest.tools/gotestsum", gh("gotestyourself", "gotestsum")),
        ("gotest.tools", gh("gotestyourself", "gotest.tools")),
        ("honnef.co/go/tools", gh("dominikh", "go-tools")),
        (
            "howett.net/plist",
            Mirror::new(
                Source::GitlabCustom("https://gitlab.howett.net".to_string()),
                "go",
                "plist",
            ),
        ),
        ("launchpad.net/gocheck", gh("go-check", "check")),
        ("layeh.com/radius", gh("layeh", "radius")),
        ("sigs.k8s.io/yaml", gh("kubernetes-sigs", "yaml")),
        ("tinygo.org/x/go-llvm", gh("tinygo-org", "go-llvm")),
    ]
});

/// `path` equals `prefix` or continues it past a `/`.
pub(super) fn has_path_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

pub(super) fn lookup(path: &str) -> Option<Mirror> {
    MIRRORS
        .iter()
        .find(|(prefix, _)| has_path_prefix(path, prefix))
        .map(|(_, mirror)| mirror.clone())
}
