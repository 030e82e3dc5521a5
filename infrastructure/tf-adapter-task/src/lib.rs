//! tf-adapter-task: Windows タスクスケジューラ（COM）でログオンタスクを登録・削除するアダプタ。
//!
//! 各呼び出しでCOMを初期化し、サービスに接続してルートフォルダを取得する。
//! 失敗はどのステップで起きたかを `TaskStep` 名で報告する。

use tf_domain::DomainError;
use tf_domain::model::{RemoveOutcome, TaskRegistration};
use tf_domain::port::driven::TaskScheduler;

/// タスクスケジューラアダプター
#[derive(Debug, Default, Clone)]
pub struct TaskSchedulerAdapter;

impl TaskSchedulerAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl TaskScheduler for TaskSchedulerAdapter {
    /// ルートフォルダへ create-or-update で登録
    fn register(&self, registration: &TaskRegistration) -> Result<(), DomainError> {
        #[cfg(windows)]
        {
            com::register_task(registration)
        }

        #[cfg(not(windows))]
        {
            Err(DomainError::Unsupported(format!(
                "scheduled task registration ({})",
                registration.name
            )))
        }
    }

    fn delete(&self, task_name: &str) -> Result<RemoveOutcome, DomainError> {
        #[cfg(windows)]
        {
            com::delete_task(task_name)
        }

        #[cfg(not(windows))]
        {
            Err(DomainError::Unsupported(format!(
                "scheduled task removal ({})",
                task_name
            )))
        }
    }
}

/// ファイル/パス未検出を表すHRESULTか
pub fn is_not_found_hresult(code: u32) -> bool {
    matches!(code, 0x8007_0002 | 0x8007_0003)
}

#[cfg(windows)]
mod com {
    use std::mem::ManuallyDrop;

    use tf_domain::DomainError;
    use tf_domain::model::{RemoveOutcome, TASK_ROOT_FOLDER, TaskRegistration, TaskStep};
    use windows::Win32::Foundation::{RPC_E_CHANGED_MODE, RPC_E_TOO_LATE, S_FALSE, S_OK, VARIANT_FALSE, VARIANT_TRUE};
    use windows::Win32::System::Com::{
        CLSCTX_INPROC_SERVER, COINIT_MULTITHREADED, CoCreateInstance, CoInitializeEx,
        CoInitializeSecurity, CoUninitialize, EOAC_NONE, RPC_C_AUTHN_LEVEL_PKT_PRIVACY,
        RPC_C_IMP_LEVEL_IMPERSONATE,
    };
    use windows::Win32::System::TaskScheduler::{
        IExecAction, ILogonTrigger, ITaskFolder, ITaskService, TASK_ACTION_EXEC,
        TASK_CREATE_OR_UPDATE, TASK_LOGON_NONE, TASK_TRIGGER_LOGON,
        TaskScheduler as TASKSERVICE_CLSID,
    };
    use windows::Win32::System::Variant::{VARIANT, VT_BSTR, VariantClear};
    use windows::core::{BSTR, Interface};

    struct CoUninit(bool);
    impl Drop for CoUninit {
        fn drop(&mut self) {
            if self.0 {
                unsafe { CoUninitialize() }
            }
        }
    }

    /// BSTRを保持するVARIANT（破棄時にクリア）
    struct VariantGuard(VARIANT);
    impl VariantGuard {
        fn from_str(value: &str) -> Self {
            let mut variant = VARIANT::default();
            unsafe {
                let inner = &mut *variant.Anonymous.Anonymous;
                inner.vt = VT_BSTR;
                inner.Anonymous.bstrVal = ManuallyDrop::new(BSTR::from(value));
            }
            Self(variant)
        }

        fn as_ref(&self) -> &VARIANT {
            &self.0
        }
    }
    impl Drop for VariantGuard {
        fn drop(&mut self) {
            unsafe {
                let _ = VariantClear(&mut self.0);
            }
        }
    }

    fn step_error(step: TaskStep, err: &windows::core::Error) -> DomainError {
        DomainError::step_failed(step.as_str(), tf_win_error::describe_error(err))
    }

    fn with_task_service<T, F>(f: F) -> Result<T, DomainError>
    where
        F: FnOnce(&ITaskService, &ITaskFolder) -> Result<T, DomainError>,
    {
        unsafe {
            let hr = CoInitializeEx(None, COINIT_MULTITHREADED);
            let did_init = if hr == S_OK || hr == S_FALSE {
                true
            } else if hr == RPC_E_CHANGED_MODE {
                // 既に別モデルで初期化済み。この場合はUninitializeしない。
                false
            } else {
                return Err(DomainError::step_failed(
                    TaskStep::InitializeCom.as_str(),
                    tf_win_error::describe_with_code(hr.0 as u32),
                ));
            };
            let _guard = CoUninit(did_init);

            // プロセス内で既に設定済みなら RPC_E_TOO_LATE になるが、そのまま続行する
            if let Err(e) = CoInitializeSecurity(
                None,
                -1,
                None,
                None,
                RPC_C_AUTHN_LEVEL_PKT_PRIVACY,
                RPC_C_IMP_LEVEL_IMPERSONATE,
                None,
                EOAC_NONE,
                None,
            ) {
                if e.code() != RPC_E_TOO_LATE {
                    return Err(step_error(TaskStep::InitializeSecurity, &e));
                }
            }

            let service: ITaskService =
                CoCreateInstance(&TASKSERVICE_CLSID, None, CLSCTX_INPROC_SERVER)
                    .map_err(|e| step_error(TaskStep::ConnectService, &e))?;
            service
                .Connect(
                    &VARIANT::default(),
                    &VARIANT::default(),
                    &VARIANT::default(),
                    &VARIANT::default(),
                )
                .map_err(|e| step_error(TaskStep::ConnectService, &e))?;

            let folder = service
                .GetFolder(&BSTR::from(TASK_ROOT_FOLDER))
                .map_err(|e| step_error(TaskStep::GetRootFolder, &e))?;

            f(&service, &folder)
        }
    }

    pub(super) fn register_task(registration: &TaskRegistration) -> Result<(), DomainError> {
        let definition = &registration.definition;

        with_task_service(|service, folder| unsafe {
            let task_def = service
                .NewTask(0)
                .map_err(|e| step_error(TaskStep::NewTask, &e))?;

            let info = task_def
                .RegistrationInfo()
                .map_err(|e| step_error(TaskStep::RegistrationInfo, &e))?;
            let meta = &definition.registration;
            info.SetAuthor(&BSTR::from(meta.author.as_str()))
                .and_then(|_| info.SetDescription(&BSTR::from(meta.description.as_str())))
                .and_then(|_| info.SetVersion(&BSTR::from(meta.version.as_str())))
                .and_then(|_| info.SetDate(&BSTR::from(meta.date.as_str())))
                .map_err(|e| step_error(TaskStep::RegistrationInfo, &e))?;

            let settings = task_def
                .Settings()
                .map_err(|e| step_error(TaskStep::Settings, &e))?;
            let start_when_available = if definition.settings.start_when_available {
                VARIANT_TRUE
            } else {
                VARIANT_FALSE
            };
            settings
                .SetStartWhenAvailable(start_when_available)
                .map_err(|e| step_error(TaskStep::Settings, &e))?;

            let logon = &definition.trigger;
            let trigger = task_def
                .Triggers()
                .and_then(|triggers| triggers.Create(TASK_TRIGGER_LOGON))
                .map_err(|e| step_error(TaskStep::LogonTrigger, &e))?;
            let logon_trigger: ILogonTrigger = trigger
                .cast()
                .map_err(|e| step_error(TaskStep::LogonTrigger, &e))?;
            logon_trigger
                .SetUserId(&BSTR::from(logon.user_id.as_str()))
                .and_then(|_| logon_trigger.SetDelay(&BSTR::from(logon.delay.as_str())))
                .map_err(|e| step_error(TaskStep::LogonTrigger, &e))?;

            let exec_action = &definition.action;
            let action = task_def
                .Actions()
                .and_then(|actions| actions.Create(TASK_ACTION_EXEC))
                .map_err(|e| step_error(TaskStep::ExecAction, &e))?;
            let exec: IExecAction = action
                .cast()
                .map_err(|e| step_error(TaskStep::ExecAction, &e))?;
            let path = exec_action.path.to_string_lossy();
            let dir = exec_action.working_directory.to_string_lossy();
            exec.SetPath(&BSTR::from(path.as_ref()))
                .and_then(|_| exec.SetWorkingDirectory(&BSTR::from(dir.as_ref())))
                .and_then(|_| exec.SetArguments(&BSTR::from(exec_action.arguments.as_str())))
                .map_err(|e| step_error(TaskStep::ExecAction, &e))?;

            let user = VariantGuard::from_str(&registration.run_as);
            let password = VARIANT::default();
            let sddl = VariantGuard::from_str("");
            folder
                .RegisterTaskDefinition(
                    &BSTR::from(registration.name.as_str()),
                    &task_def,
                    TASK_CREATE_OR_UPDATE.0,
                    user.as_ref(),
                    &password,
                    TASK_LOGON_NONE,
                    sddl.as_ref(),
                )
                .map_err(|e| step_error(TaskStep::Register, &e))?;

            Ok(())
        })
    }

    pub(super) fn delete_task(task_name: &str) -> Result<RemoveOutcome, DomainError> {
        with_task_service(|_service, folder| unsafe {
            match folder.DeleteTask(&BSTR::from(task_name), 0) {
                Ok(()) => Ok(RemoveOutcome::Removed),
                Err(e) if super::is_not_found_hresult(e.code().0 as u32) => {
                    Ok(RemoveOutcome::NotFound)
                }
                Err(e) => Err(step_error(TaskStep::Delete, &e)),
            }
        })
    }
}
