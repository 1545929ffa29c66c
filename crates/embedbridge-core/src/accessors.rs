//! Named accessors for the Silverlight plugin object model.

use crate::bridge::ScriptBridge;
use crate::error::Result;
use crate::executor::ScriptExecutor;
use crate::statement::Namespace;

impl<E: ScriptExecutor> ScriptBridge<E> {
    /// Direct method `isVersionSupported`.
    pub fn is_version_supported(&self, version: &str) -> Result<bool> {
        self.call_as(Namespace::Direct, "isVersionSupported", &[version])
    }

    /// Content property `accessibility`.
    pub fn accessibility(&self) -> Result<String> {
        self.get_content_property("accessibility")
    }

    /// Content property `actualHeight`.
    pub fn actual_height(&self) -> Result<i64> {
        self.read_as(Namespace::Content, "actualHeight")
    }

    /// Content property `actualWidth`.
    pub fn actual_width(&self) -> Result<i64> {
        self.read_as(Namespace::Content, "actualWidth")
    }

    /// Content method `createFromXaml`. The created object is not returned.
    pub fn create_from_xaml(&self, xaml: &str, name_scope: &str) -> Result<()> {
        let statement = self
            .statements()
            .call(Namespace::Content, "createFromXaml", &[xaml, name_scope]);
        self.execute(&statement)?;
        Ok(())
    }

    /// Content method `findName`.
    pub fn find_name(&self, object_name: &str) -> Result<String> {
        self.call_content_method("findName", &[object_name])
    }

    pub fn is_full_screen(&self) -> Result<bool> {
        self.read_as(Namespace::Content, "fullScreen")
    }

    pub fn init_params(&self) -> Result<String> {
        self.get_direct_property("initParams")
    }

    pub fn is_loaded(&self) -> Result<bool> {
        self.read_as(Namespace::Direct, "isLoaded")
    }

    pub fn root(&self) -> Result<String> {
        self.get_direct_property("root")
    }

    pub fn source(&self) -> Result<String> {
        self.get_direct_property("source")
    }

    pub fn background(&self) -> Result<String> {
        self.get_settings_property("background")
    }

    pub fn is_framerate_counter_enabled(&self) -> Result<bool> {
        self.read_as(Namespace::Settings, "enableFramerateCounter")
    }

    pub fn is_redraw_regions_enabled(&self) -> Result<bool> {
        self.read_as(Namespace::Settings, "enableRedrawRegions")
    }

    pub fn is_html_access_enabled(&self) -> Result<bool> {
        self.read_as(Namespace::Settings, "enableHtmlAccess")
    }

    pub fn max_frame_rate(&self) -> Result<i64> {
        self.read_as(Namespace::Settings, "maxFrameRate")
    }

    pub fn is_windowless(&self) -> Result<bool> {
        self.read_as(Namespace::Settings, "windowless")
    }
}
