//! Built-in templates and template directory discovery.
//!
//! Every template id is the raw leaf name as written in the directory tree,
//! placeholders included (`<%= project_name %>-Prefix.pch`). User templates
//! with the same id shadow the built-in one.
//!
//! # Search order
//!
//! 1. **`$LIFTOFF_TEMPLATES_DIR`**: environment variable override.
//! 2. **`./.liftoff/templates`**: per-project overrides in the working directory.
//! 3. **`~/.liftoff/templates`**: per-user overrides.
//! 4. The templates below, compiled into the binary.

use std::path::PathBuf;

use directories::BaseDirs;
use tracing::debug;

pub const TEMPLATES_DIR_ENV: &str = "LIFTOFF_TEMPLATES_DIR";

/// Look up a built-in template body by id.
pub fn builtin(id: &str) -> Option<&'static str> {
    BUILTIN_TEMPLATES
        .iter()
        .find(|(name, _)| *name == id)
        .map(|(_, body)| *body)
}

/// Ids of all built-in templates, in declaration order.
pub fn builtin_ids() -> impl Iterator<Item = &'static str> {
    BUILTIN_TEMPLATES.iter().map(|(name, _)| *name)
}

/// Ordered template directories to probe before the built-ins.
///
/// Missing env var or home directory are silently omitted; directories that
/// do not exist are kept so callers can report where they looked.
pub fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(3);

    if let Ok(env_dir) = std::env::var(TEMPLATES_DIR_ENV) {
        if !env_dir.trim().is_empty() {
            let p = PathBuf::from(env_dir);
            debug!(path = %p.display(), "candidate from ${}", TEMPLATES_DIR_ENV);
            paths.push(p);
        }
    }

    paths.push(PathBuf::from(".liftoff").join("templates"));

    if let Some(base) = BaseDirs::new() {
        paths.push(base.home_dir().join(".liftoff").join("templates"));
    }

    paths
}

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("AppDelegate.h", APP_DELEGATE_H),
    ("AppDelegate.m", APP_DELEGATE_M),
    ("main.m", MAIN_M),
    ("Info.plist", INFO_PLIST),
    ("<%= project_name %>-Prefix.pch", PREFIX_PCH),
    ("Localizable.strings", LOCALIZABLE_STRINGS),
    ("README.md", README_MD),
    ("Podfile", PODFILE),
    (".gitignore", GITIGNORE),
];

macro_rules! file_header {
    () => {
        "//
//  <%= project_name %>
//
//  Created by <%= author %>.
//  Copyright (c) <%= year %> <%= company %>. All rights reserved.
//
"
    };
}

const APP_DELEGATE_H: &str = concat!(
    file_header!(),
    "
@interface <%= prefix %>AppDelegate : UIResponder <UIApplicationDelegate>

@property (nonatomic, strong) UIWindow *window;

@end
"
);

const APP_DELEGATE_M: &str = concat!(
    file_header!(),
    r#"
#import "AppDelegate.h"

@implementation <%= prefix %>AppDelegate

- (BOOL)application:(UIApplication *)application didFinishLaunchingWithOptions:(NSDictionary *)launchOptions
{
    self.window = [[UIWindow alloc] initWithFrame:[[UIScreen mainScreen] bounds]];
    self.window.backgroundColor = [UIColor whiteColor];
    [self.window makeKeyAndVisible];
    return YES;
}

@end
"#
);

const MAIN_M: &str = concat!(
    file_header!(),
    r#"
#import "AppDelegate.h"

int main(int argc, char *argv[])
{
    @autoreleasepool {
        return UIApplicationMain(argc, argv, nil, NSStringFromClass([<%= prefix %>AppDelegate class]));
    }
}
"#
);

const INFO_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>CFBundleDevelopmentRegion</key>
	<string>en</string>
	<key>CFBundleDisplayName</key>
	<string><%= project_name %></string>
	<key>CFBundleExecutable</key>
	<string>${EXECUTABLE_NAME}</string>
	<key>CFBundleIdentifier</key>
	<string><%= company_identifier %>.${PRODUCT_NAME:rfc1034identifier}</string>
	<key>CFBundleInfoDictionaryVersion</key>
	<string>6.0</string>
	<key>CFBundleName</key>
	<string>${PRODUCT_NAME}</string>
	<key>CFBundlePackageType</key>
	<string>APPL</string>
	<key>CFBundleShortVersionString</key>
	<string>1.0</string>
	<key>CFBundleVersion</key>
	<string>1</string>
	<key>LSRequiresIPhoneOS</key>
	<true/>
	<key>UIRequiredDeviceCapabilities</key>
	<array>
		<string>armv7</string>
	</array>
	<key>UISupportedInterfaceOrientations</key>
	<array>
		<string>UIInterfaceOrientationPortrait</string>
	</array>
</dict>
</plist>
"#;

const PREFIX_PCH: &str = r#"//
//  Prefix header for all source files of the '<%= project_name %>' target.
//

#import <Availability.h>

#ifndef __IPHONE_7_0
#warning "This project uses features only available in iOS SDK 7.0 and later."
#endif

#ifdef __OBJC__
    #import <UIKit/UIKit.h>
    #import <Foundation/Foundation.h>
#endif
"#;

const LOCALIZABLE_STRINGS: &str = r#"/*
  Localizable.strings
  <%= project_name %>
*/
"#;

const README_MD: &str = "# <%= project_name %>

Created by <%= author %> at <%= company %>.
";

const PODFILE: &str = "platform :ios, '7.0'

target '<%= project_name %>' do
end
";

const GITIGNORE: &str = "# Xcode
build/
DerivedData/
*.pbxuser
*.mode1v3
*.mode2v3
*.perspectivev3
xcuserdata/
*.xccheckout
*.moved-aside
*.xcuserstate

# CocoaPods
Pods/
";
