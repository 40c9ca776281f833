//! Build script for Satsuma
//!
//! Embeds the application icon and version info into the Windows executable.

fn main() {
    // Only run on Windows builds
    #[cfg(target_os = "windows")]
    {
        windows_build();
    }
}

#[cfg(target_os = "windows")]
fn windows_build() {
    // Embed icon and version info into the Windows executable
    let mut res = winresource::WindowsResource::new();

    res.set("ProductName", "Satsuma");
    res.set("FileDescription", "Desktop Media Player");
    res.set("LegalCopyright", "MIT License");

    // Compile the resources
    if let Err(e) = res.compile() {
        eprintln!("Failed to compile Windows resources: {}", e);
        // Don't fail the build - version info is optional
    }
}
