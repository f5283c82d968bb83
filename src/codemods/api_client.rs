//! Migration of the admin settings page from raw `fetch` calls to the shared
//! axios client.

use crate::diff::rules::{Rule, RuleSet};
use crate::error::CodemodResult;

pub const NAME: &str = "api-client";

pub const DEFAULT_IMPORT: &str = "../services/api";

const AUTH_IMPORT: &str = "import { useAuth } from '../contexts/AuthContext';";

const FETCH_CONFIG: &str = r#"const fetchConfig = async () => {
    try {
      setLoading(true);
      const response = await api.get('/admin/configs');
      
      if (response.data.config) {
        setConfig(response.data.config);
        setOriginalConfig(response.data.config);
      }
    } catch (error) {
      console.error('Error fetching config:', error);
      setError('Failed to load configuration');
    } finally {
      setLoading(false);
    }
  };"#;

const HANDLE_SAVE: &str = r#"const handleSave = async () => {
    try {
      setSaving(true);
      setError('');
      
      const response = await api.put('/admin/configs', config);
      
      if (response.data.config) {
        setConfig(response.data.config);
        setOriginalConfig(response.data.config);
        setSaveSuccess(true);
        setModifiedFields(new Set());
        
        // Hide success message after 3 seconds
        setTimeout(() => setSaveSuccess(false), 3000);
      }
    } catch (error) {
      console.error('Error saving configuration:', error);
      setError(error.response?.data?.message || 'Failed to save configuration');
    } finally {
      setSaving(false);
    }
  };"#;

const HANDLE_TEST_EMAIL: &str = r#"const handleTestEmail = async () => {
    if (!testEmail) {
      setEmailTestResult({ success: false, message: 'Please enter a test email address' });
      return;
    }
    
    setEmailTesting(true);
    setEmailTestResult(null);
    
    try {
      const response = await api.post('/admin/test-email', { to: testEmail });
      
      setEmailTestResult({
        success: true,
        message: response.data.message || 'Test email sent successfully!'
      });
    } catch (error) {
      setEmailTestResult({
        success: false,
        message: error.response?.data?.message || 'Failed to send test email'
      });
    } finally {
      setEmailTesting(false);
    }
  };"#;

const HANDLE_RESET_TO_DEFAULTS: &str = r#"const handleResetToDefaults = async () => {
    if (!window.confirm('Are you sure you want to reset all settings to defaults? This cannot be undone.')) {
      return;
    }
    
    try {
      setLoading(true);
      const response = await api.post('/admin/configs/reset');
      
      if (response.data.config) {
        setConfig(response.data.config);
        setOriginalConfig(response.data.config);
        setSaveSuccess(true);
        setModifiedFields(new Set());
        
        // Hide success message after 3 seconds
        setTimeout(() => setSaveSuccess(false), 3000);
      }
    } catch (error) {
      console.error('Error resetting configuration:', error);
      setError(error.response?.data?.message || 'Failed to reset configuration');
    } finally {
      setLoading(false);
    }
  };"#;

const HANDLE_TEST_VA_WEBHOOK: &str = r#"const handleTestVAWebhook = async () => {
    setWebhookTesting(true);
    setWebhookTestResult(null);
    
    try {
      const response = await api.post('/admin/test-va-webhook', {
        url: config.va_webhook_url,
        secret: config.va_webhook_secret
      });
      
      setWebhookTestResult({
        success: true,
        message: response.data.message || 'Webhook test successful!'
      });
    } catch (error) {
      setWebhookTestResult({
        success: false,
        message: error.response?.data?.message || 'Webhook test failed'
      });
    } finally {
      setWebhookTesting(false);
    }
  };"#;

const HANDLE_EXPORT_CONFIG: &str = r#"const handleExportConfig = async () => {
    try {
      const response = await api.get('/admin/configs/export');
      
      const blob = new Blob([JSON.stringify(response.data, null, 2)], { type: 'application/json' });
      const url = window.URL.createObjectURL(blob);
      const a = document.createElement('a');
      a.href = url;
      a.download = `config-export-${new Date().toISOString().split('T')[0]}.json`;
      document.body.appendChild(a);
      a.click();
      document.body.removeChild(a);
      window.URL.revokeObjectURL(url);
    } catch (error) {
      console.error('Error exporting configuration:', error);
      setError(error.response?.data?.message || 'Failed to export configuration');
    }
  };"#;

const HANDLE_IMPORT_CONFIG: &str = r#"const handleImportConfig = async (file) => {
    const formData = new FormData();
    formData.append('config', file);
    
    try {
      setLoading(true);
      const response = await api.post('/admin/configs/import', formData);
      
      if (response.data.config) {
        setConfig(response.data.config);
        setOriginalConfig(response.data.config);
        setSaveSuccess(true);
        setModifiedFields(new Set());
        
        // Hide success message after 3 seconds
        setTimeout(() => setSaveSuccess(false), 3000);
      }
    } catch (error) {
      console.error('Error importing configuration:', error);
      setError(error.response?.data?.message || 'Failed to import configuration');
    } finally {
      setLoading(false);
    }
  };"#;

/// Component handlers rewritten to the API client: (name, parameter list, body)
const HANDLERS: &[(&str, &str, &str)] = &[
    ("fetchConfig", "", FETCH_CONFIG),
    ("handleSave", "", HANDLE_SAVE),
    ("handleTestEmail", "", HANDLE_TEST_EMAIL),
    ("handleResetToDefaults", "", HANDLE_RESET_TO_DEFAULTS),
    ("handleTestVAWebhook", "", HANDLE_TEST_VA_WEBHOOK),
    ("handleExportConfig", "", HANDLE_EXPORT_CONFIG),
    ("handleImportConfig", "file", HANDLE_IMPORT_CONFIG),
];

/// Pattern for a component-level `const name = async (params) => { ... };`
///
/// The header must start a line at two-space depth and the body runs to the
/// first line that is exactly a two-space `};`, so a same-named handler
/// nested deeper is left alone.
fn handler_pattern(name: &str, params: &str) -> String {
    format!(
        r"(?m)^  const {} = async \({}\) => \{{(?s:.*?)\n  \}};",
        regex::escape(name),
        regex::escape(params)
    )
}

/// Import rule; an import line already present is absorbed so the rule does
/// not stack a second copy.
fn import_rule(api_import: &str) -> CodemodResult<Rule> {
    let pattern = format!(
        r"{}(?:\r?\nimport api from '[^'\n]*';)?",
        regex::escape(AUTH_IMPORT)
    );
    Rule::literal(
        "add api import",
        &pattern,
        format!("{}\nimport api from '{}';", AUTH_IMPORT, api_import),
    )
}

pub fn rule_set(api_import: &str) -> CodemodResult<RuleSet> {
    let mut set = RuleSet::new(NAME, "Route raw fetch calls through the shared API client")
        .with_rule(import_rule(api_import)?.with_summary("- Added api import"));

    for (name, params, body) in HANDLERS {
        let rule = Rule::literal(
            format!("rewrite {}", name),
            &handler_pattern(name, params),
            format!("  {}", body),
        )?;
        set = set.with_rule(rule.with_summary("- Updated all API calls to use api service"));
    }

    Ok(set)
}
