// @generated by hostmock. Do not edit by hand.
// Namespace: `mod`

#![allow(dead_code, unused_imports)]

use std::sync::LazyLock;
use hostmock_runtime::{ApiContext, ApiMember, ApiModel, ApiObject, EnumDecl, EnumVariant, FakeBuilder, Field, Impls, Literal, MockFn, Param, RuntimeError, TypeDecl, TypeExpr, Value, setup_global};

/// Binding the host installs this API under.
pub const NAMESPACE: &str = "mod";

static API_MODEL: LazyLock<ApiModel> = LazyLock::new(api_model);

/// Callable members of `mod`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModMember {
    /// `GetObjId(): number`
    GetObjId,
    /// `DisplayMessage(message: string, players?: Player[]): void`
    DisplayMessage,
}

impl ModMember {
    /// Every member, in declaration order.
    pub const ALL: &'static [Self] = &[Self::GetObjId, Self::DisplayMessage];

    /// Name as declared.
    pub fn name(self) -> &'static str {
        match self {
            Self::GetObjId => "GetObjId",
            Self::DisplayMessage => "DisplayMessage",
        }
    }

    /// Signature exactly as declared.
    pub fn signature(self) -> &'static ApiMember {
        &model().members[self.index()]
    }

    fn index(self) -> usize {
        match self {
            Self::GetObjId => 0,
            Self::DisplayMessage => 1,
        }
    }
}

impl AsRef<str> for ModMember {
    fn as_ref(&self) -> &str {
        self.name()
    }
}

/// Declared value types, usable as `create_fake` names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModType {
    Player,
    Team,
}

impl ModType {
    /// Every declared type.
    pub const ALL: &'static [Self] = &[Self::Player, Self::Team];

    /// Name as declared.
    pub fn name(self) -> &'static str {
        match self {
            Self::Player => "Player",
            Self::Team => "Team",
        }
    }
}

impl AsRef<str> for ModType {
    fn as_ref(&self) -> &str {
        self.name()
    }
}

/// The scanned API, built once.
pub fn model() -> &'static ApiModel {
    &API_MODEL
}

/// Rebuild the scanned API model.
pub fn api_model() -> ApiModel {
    ApiModel::new("mod")
        .member(
            ApiMember::new("GetObjId")
                .returns(TypeExpr::number())
        )
        .member(
            ApiMember::new("DisplayMessage")
                .param(Param::new("message", TypeExpr::string()))
                .param(Param::new("players", TypeExpr::array(TypeExpr::named("Player"))).optional())
        )
        .type_decl(
            TypeDecl::new("Player")
                .field(Field::new("name", TypeExpr::string()))
                .field(Field::new("team", TypeExpr::named("Team")).optional())
        )
        .enum_decl(
            EnumDecl::new("Team")
                .variant(EnumVariant::new("Team1").value(Literal::Number("1".into())))
                .variant(EnumVariant::new("Team2").value(Literal::Number("2".into())))
        )
}

/// `mod` as installed by [`setup_mod_mock`].
#[derive(Debug, Clone)]
pub struct ModMock(ApiObject);

impl ModMock {
    /// Recording stand-in for `member`, if it was selected.
    pub fn mock(&self, member: ModMember) -> Option<&MockFn> {
        self.0.mock(member.name())
    }

    pub fn call(&self, member: ModMember, args: &[Value]) -> Result<Value, RuntimeError> {
        self.0.call(member.name(), args)
    }

    pub fn object(&self) -> &ApiObject {
        &self.0
    }

    pub fn into_inner(self) -> ApiObject {
        self.0
    }

    /// `GetObjId(): number`
    pub fn get_obj_id(&self) -> Option<&MockFn> {
        self.mock(ModMember::GetObjId)
    }

    /// `DisplayMessage(message: string, players?: Player[]): void`
    pub fn display_message(&self) -> Option<&MockFn> {
        self.mock(ModMember::DisplayMessage)
    }
}

impl std::ops::Deref for ModMock {
    type Target = ApiObject;

    fn deref(&self) -> &ApiObject {
        &self.0
    }
}

/// Mock `members` of `mod`, layer them over `extra` and install the result
/// in `ctx`, replacing any previous binding.
pub fn setup_mod_mock(ctx: &ApiContext, members: &[ModMember], impls: &Impls, extra: Option<ApiObject>) -> ModMock {
    ModMock(setup_global(ctx, NAMESPACE, members.iter().map(|m| m.name()), impls, extra))
}

/// Like the selective setup, with every member mocked.
pub fn setup_all_mod_mock(ctx: &ApiContext, impls: &Impls, extra: Option<ApiObject>) -> ModMock {
    setup_mod_mock(ctx, ModMember::ALL, impls, extra)
}

/// Minimal instance of a declared type with `overrides` on top.
pub fn create_fake(type_name: impl AsRef<str>, overrides: Option<Value>) -> Value {
    hostmock_runtime::create_fake(model(), type_name.as_ref(), overrides)
}

/// Fake builder over this model, for replacing default rules.
pub fn fake_builder() -> FakeBuilder<'static> {
    FakeBuilder::new(model())
}
