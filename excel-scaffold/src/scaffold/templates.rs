//! Built-in artifact templates
//!
//! One named Handlebars template per artifact kind. Block helpers share a
//! line with surrounding text so output whitespace never depends on
//! standalone-line trimming.

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::Result;

/// Sentinel opening an injection region in a generated controller
pub const REGION_BEGIN: &str = "// @scaffold-begin";

/// Sentinel closing an injection region in a generated controller
pub const REGION_END: &str = "// @scaffold-end";

/// Anonymous-class migration
pub const MIGRATION_TEMPLATE: &str = r"<?php

use Illuminate\Database\Migrations\Migration;
use Illuminate\Database\Schema\Blueprint;
use Illuminate\Support\Facades\Schema;

return new class extends Migration
{
    /**
     * Run the migrations.
     *
     * @return void
     */
    public function up()
    {
        Schema::create('{{table_name}}', function (Blueprint $table) {
            $table->id();
{{#each lines}}            {{this}};
{{/each}}            $table->timestamps();
        });
    }

    /**
     * Reverse the migrations.
     *
     * @return void
     */
    public function down()
    {
        Schema::dropIfExists('{{table_name}}');
    }
};
";

/// Eloquent model
pub const MODEL_TEMPLATE: &str = r"<?php

namespace {{namespace}};

use Illuminate\Database\Eloquent\Factories\HasFactory;
use Illuminate\Database\Eloquent\Model;

class {{model_name}} extends Model
{
    use HasFactory;

    protected $fillable = [{{fillable}}];{{#each relationships}}

    public function {{method}}()
    {
        return $this->{{call}};
    }{{/each}}{{#if uuid_column}}

    protected static function boot()
    {
        parent::boot();

        static::creating(function ($model) {
            if (empty($model->{{uuid_column}})) {
                $model->{{uuid_column}} = (string) \Illuminate\Support\Str::uuid();
            }
        });
    }{{/if}}
}
";

/// Resource controller; `api` drops the `create` and `edit` form actions
pub const CONTROLLER_TEMPLATE: &str = r"<?php

namespace {{namespace}};

{{#if needs_base_import}}use {{base_namespace}}\Controller;
{{/if}}use {{model_fqcn}};
use Illuminate\Http\Request;

class {{class_name}} extends Controller
{
    /**
     * Display a listing of the resource.
     */
    public function index()
    {
        //
    }{{#unless api}}

    /**
     * Show the form for creating a new resource.
     */
    public function create()
    {
        //
    }{{/unless}}

    // @scaffold-begin store
    /**
     * Store a newly created resource in storage.
     */
    public function store(Request $request)
    {
        //
    }
    // @scaffold-end store

    /**
     * Display the specified resource.
     */
    public function show({{model_name}} ${{model_var}})
    {
        //
    }{{#unless api}}

    /**
     * Show the form for editing the specified resource.
     */
    public function edit({{model_name}} ${{model_var}})
    {
        //
    }{{/unless}}

    // @scaffold-begin update
    /**
     * Update the specified resource in storage.
     */
    public function update(Request $request, {{model_name}} ${{model_var}})
    {
        //
    }
    // @scaffold-end update

    /**
     * Remove the specified resource from storage.
     */
    public function destroy({{model_name}} ${{model_var}})
    {
        //
    }
}
";

/// Form request with open authorization and an empty rule set
pub const REQUEST_TEMPLATE: &str = r"<?php

namespace {{namespace}};

use Illuminate\Foundation\Http\FormRequest;

class {{class_name}} extends FormRequest
{
    public function authorize(): bool
    {
        return true;
    }

    public function rules(): array
    {
        return [
            // TODO: Add validation rules for {{model_name}}
        ];
    }
}
";

/// Typed `store` body spliced between the store sentinels
pub const STORE_METHOD_TEMPLATE: &str = r"    /**
     * Store a newly created resource in storage.
     */
    public function store({{request_class}} $request)
    {
        $validated = $request->validated();
        // TODO: Store logic here
    }
";

/// Typed `update` body spliced between the update sentinels
pub const UPDATE_METHOD_TEMPLATE: &str = r"    /**
     * Update the specified resource in storage.
     */
    public function update({{request_class}} $request, {{model_name}} ${{model_var}})
    {
        $validated = $request->validated();
        // TODO: Update logic here
    }
";

/// Artifact kinds with a registered template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// Table migration
    Migration,
    /// Eloquent model
    Model,
    /// Resource controller
    Controller,
    /// Form request
    Request,
    /// Typed store method
    StoreMethod,
    /// Typed update method
    UpdateMethod,
}

impl TemplateKind {
    /// Every kind, in registration order
    pub const ALL: [Self; 6] = [
        Self::Migration,
        Self::Model,
        Self::Controller,
        Self::Request,
        Self::StoreMethod,
        Self::UpdateMethod,
    ];

    /// Registry name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Migration => "migration",
            Self::Model => "model",
            Self::Controller => "controller",
            Self::Request => "request",
            Self::StoreMethod => "store_method",
            Self::UpdateMethod => "update_method",
        }
    }

    /// Template source
    #[must_use]
    pub const fn source(self) -> &'static str {
        match self {
            Self::Migration => MIGRATION_TEMPLATE,
            Self::Model => MODEL_TEMPLATE,
            Self::Controller => CONTROLLER_TEMPLATE,
            Self::Request => REQUEST_TEMPLATE,
            Self::StoreMethod => STORE_METHOD_TEMPLATE,
            Self::UpdateMethod => UPDATE_METHOD_TEMPLATE,
        }
    }
}

/// Compiled templates for every artifact kind
pub struct TemplateRegistry {
    handlebars: Handlebars<'static>,
}

impl TemplateRegistry {
    /// Compile all built-in templates
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to parse.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Disable HTML escaping since we're generating code
        handlebars.register_escape_fn(handlebars::no_escape);

        for kind in TemplateKind::ALL {
            handlebars
                .register_template_string(kind.name(), kind.source())
                .map_err(Box::new)?;
        }

        Ok(Self { handlebars })
    }

    /// Render a template with `data`
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn render<T: Serialize>(&self, kind: TemplateKind, data: &T) -> Result<String> {
        Ok(self.handlebars.render(kind.name(), data)?)
    }
}
