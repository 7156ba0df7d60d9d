/// Contents written by `bundle-config init`.
pub fn generate_init_template() -> &'static str {
	r#"# bundle-config options
#
# Locations are relative to this file unless absolute.
root-path = "."
# src-path = "src"
# dist-path = "dist"
public-path = "/"

# Library name: entry key and exported library name.
# library-name = "my-library"

enable-react = false
enable-ts = false
should-split-chunks = false

# Style sheets (regex sources) that are global CSS instead of CSS modules.
css-module-exceptions = []

# Dependency packages that still go through the script transformer.
# transpile-dependencies = ["scratch-paint", "scratch-render", "scratch-svg-renderer", "scratch-vm"]

# Worker count for the production minimizer.
# minimizer-parallelism = 2
"#
}
