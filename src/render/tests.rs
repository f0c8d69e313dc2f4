use super::*;
use crate::apis::tests::FakeFetch;
use crate::config::Config;
use crate::reader::read;
use crate::tuple::Mirror;

fn render_offline(input: &str) -> String {
    let res = read(input.as_bytes(), &Config::offline(), &FakeFetch::new()).unwrap();
    render(&res, "vendor")
}

fn gh(id: usize, package: &str, version: &str, account: &str, project: &str) -> Tuple {
    let mut t = Tuple::new(id, package, version);
    t.resolve_as(Mirror::github(account, project));
    t
}

#[test]
fn test_render_mixed_manifest() {
    let given = "
# github.com/karrick/godirwalk v1.10.12
## explicit
github.com/karrick/godirwalk
# github.com/rogpeppe/go-internal v1.3.0
## explicit
github.com/rogpeppe/go-internal/modfile
github.com/rogpeppe/go-internal/module
github.com/rogpeppe/go-internal/semver
# some_unknown.vanity_url.net/account/project v1.2.3
some_unknown.vanity_url.net/account/project
# another.vanity_url.org/account/project v1.0.0
another.vanity_url.org/account/project
# gopkg.in/user/pkg.v3 v3.0.0
gopkg.in/user/pkg.v3
# github.com/cockroachdb/cockroach-go v0.0.0-20181001143604-e0a95dfd547c
github.com/cockroachdb/cockroach-go/crdb
# gitlab.com/gitlab-org/labkit v0.0.0-20190221122536-0c3fc7cdd57c
gitlab.com/gitlab-org/labkit/correlation
# gitlab.com/gitlab-org/gitaly-proto v1.32.0
gitlab.com/gitlab-org/gitaly-proto/go/gitalypb
# github.com/golang/lint v0.0.0-20190409202823-959b441ac422 => golang.org/x/lint v0.0.0-20190409202823-959b441ac422
# github.com/ugorji/go v1.1.4 => github.com/ugorji/go/codec v0.0.0-20190204201341-e444a5086c43";

    let expected = "GH_TUPLE=\t\\
\t\tcockroachdb:cockroach-go:e0a95dfd547c:cockroachdb_cockroach_go/vendor/github.com/cockroachdb/cockroach-go \\
\t\tgolang:lint:959b441ac422:golang_lint/vendor/github.com/golang/lint \\
\t\tkarrick:godirwalk:v1.10.12:karrick_godirwalk/vendor/github.com/karrick/godirwalk \\
\t\trogpeppe:go-internal:v1.3.0:rogpeppe_go_internal/vendor/github.com/rogpeppe/go-internal \\
\t\tugorji:go:e444a5086c43:ugorji_go_codec/vendor/github.com/ugorji/go \\
\t\tuser:pkg:v3.0.0:user_pkg/vendor/gopkg.in/user/pkg.v3

GL_TUPLE=\tgitlab-org:gitaly-proto:v1.32.0:gitlab_org_gitaly_proto/vendor/gitlab.com/gitlab-org/gitaly-proto \\
\t\tgitlab-org:labkit:0c3fc7cdd57c:gitlab_org_labkit/vendor/gitlab.com/gitlab-org/labkit

\t\t# Mirrors for the following packages are not currently known, please look them up and handle these tuples manually:
\t\t#\t::v1.0.0:group_name/vendor/another.vanity_url.org/account/project (from another.vanity_url.org/account/project@v1.0.0)
\t\t#\t::v1.2.3:group_name/vendor/some_unknown.vanity_url.net/account/project (from some_unknown.vanity_url.net/account/project@v1.2.3)";

    assert_eq!(render_offline(given), expected);
}

#[test]
fn test_render_unique_groups() {
    let given = "
# github.com/minio/lsync v1.0.1
# github.com/minio/mc v0.0.0-20190924013003-643835013047
# github.com/minio/minio-go v0.0.0-20190327203652-5325257a208f
# github.com/minio/minio-go/v6 v6.0.39
# github.com/minio/parquet-go v0.0.0-20190318185229-9d767baf1679";

    let expected = "GH_TUPLE=\t\\
\t\tminio:lsync:v1.0.1:minio_lsync/vendor/github.com/minio/lsync \\
\t\tminio:mc:643835013047:minio_mc/vendor/github.com/minio/mc \\
\t\tminio:minio-go:5325257a208f:minio_minio_go/vendor/github.com/minio/minio-go \\
\t\tminio:minio-go:v6.0.39:minio_minio_go_v6/vendor/github.com/minio/minio-go/v6 \\
\t\tminio:parquet-go:9d767baf1679:minio_parquet_go/vendor/github.com/minio/parquet-go";

    assert_eq!(render_offline(given), expected);
}

#[test]
fn test_render_single_entry_inline() {
    let out = render_offline("# github.com/pkg/errors v0.8.1\n");
    assert_eq!(
        out,
        "GH_TUPLE=\tpkg:errors:v0.8.1:pkg_errors/vendor/github.com/pkg/errors"
    );
}

#[test]
fn test_render_replace_spec() {
    let out = render_offline(
        "# github.com/spf13/cobra v0.0.0 => github.com/rsteube/cobra v0.0.1-zsh-completion-custom\n",
    );
    assert_eq!(
        out,
        "GH_TUPLE=\trsteube:cobra:v0.0.1-zsh-completion-custom:rsteube_cobra/vendor/github.com/spf13/cobra"
    );
}

#[test]
fn test_render_gopkg_in() {
    let out = render_offline("# gopkg.in/yaml.v2 v2.2.2\n");
    assert_eq!(out, "GH_TUPLE=\tgo-yaml:yaml:v2.2.2:go_yaml_yaml/vendor/gopkg.in/yaml.v2");
}

#[test]
fn test_render_custom_prefix() {
    let res = read(
        "# github.com/pkg/errors v0.8.1\n".as_bytes(),
        &Config::offline(),
        &FakeFetch::new(),
    )
    .unwrap();
    assert_eq!(
        render(&res, "third_party"),
        "GH_TUPLE=\tpkg:errors:v0.8.1:pkg_errors/third_party/github.com/pkg/errors"
    );
}

#[test]
fn test_render_alias_symlink() {
    let out = render_offline(
        "# github.com/fsnotify/fsnotify v1.4.7\n# gopkg.in/fsnotify.v1 v1.4.7\n",
    );
    let expected = "GH_TUPLE=\tfsnotify:fsnotify:v1.4.7:fsnotify_fsnotify/vendor/github.com/fsnotify/fsnotify

post-extract:
\t@${MKDIR} ${WRKSRC}/vendor/gopkg.in
\t@${RLN} ${WRKSRC_fsnotify_fsnotify} ${WRKSRC}/vendor/gopkg.in/fsnotify.v1";
    assert_eq!(out, expected);
}

#[test]
fn test_post_extract_overlaid_submodule() {
    let root = gh(0, "github.com/a/b", "v1.0.0", "a", "b");
    let mut nested = Tuple::new(1, "github.com/a/b/api", "v1.2.0");
    nested.resolve_as(Mirror::github("a", "b").with_submodule("api"));
    nested.link_target = "github.com/a/b/api".into();
    nested.link_source = Some(1);
    nested.subdir.clear();

    let out = links::post_extract(&[root, nested], "vendor");
    assert_eq!(
        out,
        "post-extract:
\t@${MKDIR} ${WRKSRC}/vendor/github.com/a/b
\t@${RM} -r ${WRKSRC}/vendor/github.com/a/b/api
\t@${RLN} ${WRKSRC_a_b_api}/api ${WRKSRC}/vendor/github.com/a/b/api"
    );
}

#[test]
fn test_post_extract_mkdir_once_per_parent() {
    let canonical = gh(0, "github.com/x/y", "v1.0.0", "x", "y");
    let mut a = gh(1, "example.org/one", "v1.0.0", "x", "y");
    let mut b = gh(2, "example.org/two", "v1.0.0", "x", "y");
    for t in [&mut a, &mut b] {
        t.link_target = std::mem::take(&mut t.subdir);
        t.link_source = Some(0);
        t.hidden = true;
    }
    let out = links::post_extract(&[b, canonical, a], "vendor");
    assert_eq!(out.matches("${MKDIR}").count(), 1);
    assert_eq!(out.lines().nth(2).unwrap(), "\t@${RLN} ${WRKSRC_x_y} ${WRKSRC}/vendor/example.org/one");
}

#[test]
fn test_error_blocks_order() {
    let errors = vec![
        SoftError::new(SoftErrorKind::ReplacementLocalFilesystem, "b => ./b"),
        SoftError::new(SoftErrorKind::UnknownMirror, "z"),
        SoftError::new(SoftErrorKind::ReplacementMissingCommit, "c => d"),
        SoftError::new(SoftErrorKind::UnknownMirror, "a"),
    ];
    let out = error_blocks(&errors);
    let headers: Vec<&str> = out
        .lines()
        .filter(|l| l.starts_with("\t\t# "))
        .collect();
    assert_eq!(headers.len(), 3);
    assert!(headers[0].contains("Mirrors for the following packages"));
    assert!(headers[1].contains("missing version/commit ID"));
    assert!(headers[2].contains("local filesystem path"));
    assert!(out.contains("#\ta\n\t\t#\tz"));
    assert!(out.contains("\n\n\t\t# The following replacement packages are missing"));
}

#[test]
fn test_render_is_order_independent() {
    let lines = [
        "# github.com/minio/minio-go v0.0.0-20190327203652-5325257a208f",
        "# github.com/minio/minio-go/v6 v6.0.39",
        "# github.com/fsnotify/fsnotify v1.4.7",
        "# gopkg.in/fsnotify.v1 v1.4.7",
        "# gitlab.com/gitlab-org/labkit v0.0.0-20190221122536-0c3fc7cdd57c",
        "# unknown.example.org/x v1.0.0",
        "# github.com/a/b v1.0.0 => ./b",
    ];
    let forward = render_offline(&lines.join("\n"));
    let backward = render_offline(&lines.iter().rev().cloned().collect::<Vec<_>>().join("\n"));
    assert_eq!(forward, backward);
}

#[test]
fn test_render_empty() {
    assert_eq!(render(&Resolution::default(), "vendor"), "");
}

#[test]
fn test_spack_resources() {
    let tag = gh(0, "github.com/pkg/errors", "v0.8.1", "pkg", "errors");
    let commit = gh(1, "github.com/golang/lint", "959b441ac422", "golang", "lint");
    let out = spack::resources(&[tag, commit], "vendor", Some("1.2.3"));
    let expected = r#"
    resource(name="github.com/golang/lint",
             git="https://github.com/golang/lint",
             commit="959b441ac422",
             destination=".",
             when="@1.2.3",
             placement="vendor/github.com/golang/lint")
    resource(name="github.com/pkg/errors",
             git="https://github.com/pkg/errors",
             tag="v0.8.1",
             destination=".",
             when="@1.2.3",
             placement="vendor/github.com/pkg/errors")"#;
    assert_eq!(out, expected);
}

#[test]
fn test_spack_gitlab_without_app_version() {
    let mut t = Tuple::new(0, "howett.net/plist", "v0.0.0");
    t.resolve_as(Mirror::new(
        Source::GitlabCustom("https://gitlab.howett.net".into()),
        "go",
        "plist",
    ));
    let out = spack::resources(&[t], "vendor", None);
    assert!(out.contains("git=\"https://gitlab.howett.net/go/plist\""));
    assert!(out.contains("tag=\"v0.0.0\""));
    assert!(!out.contains("when="));
}
